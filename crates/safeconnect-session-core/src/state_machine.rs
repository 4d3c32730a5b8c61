use crate::domain::{Classification, SessionEventKind, SessionState};

/// Registry lookup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Querying,
    Classified(Classification),
}

/// Apply one bridge event to the session mirror.
///
/// `SessionUpdated` replaces chain/accounts but leaves `connected` untouched;
/// `Connected` additionally marks the session live. `Disconnected` resets
/// everything to initial values unconditionally, which is what makes a late
/// disconnect win over any event that preceded it.
pub fn apply_event(state: &SessionState, event: &SessionEventKind) -> SessionState {
    match event {
        SessionEventKind::SessionUpdated { chain_id, accounts } => SessionState {
            chain_id: *chain_id,
            accounts: accounts.clone(),
            ..state.clone()
        },
        SessionEventKind::Connected { chain_id, accounts } => SessionState {
            connected: true,
            chain_id: *chain_id,
            accounts: accounts.clone(),
            ..state.clone()
        },
        SessionEventKind::Disconnected => SessionState::default(),
    }
}
