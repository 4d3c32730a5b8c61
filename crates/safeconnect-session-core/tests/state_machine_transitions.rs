use alloy::primitives::Address;

use safeconnect_session_core::{apply_event, SessionEventKind, SessionState};

fn account(last_byte: u8) -> Address {
    Address::with_last_byte(last_byte)
}

#[test]
fn initial_state_defaults() {
    let state = SessionState::default();
    assert!(!state.connected);
    assert_eq!(state.chain_id, 1);
    assert!(state.accounts.is_empty());
    assert_eq!(state.address(), None);
    assert!(!state.fetching);
    assert!(!state.pending_request);
}

#[test]
fn connected_event_marks_session_live() {
    let state = SessionState::default();
    let next = apply_event(
        &state,
        &SessionEventKind::Connected {
            chain_id: 10,
            accounts: vec![account(1), account(2)],
        },
    );
    assert!(next.connected);
    assert_eq!(next.chain_id, 10);
    assert_eq!(next.address(), Some(account(1)));
}

#[test]
fn session_update_replaces_chain_and_accounts_but_not_connected() {
    let mut state = SessionState::default();
    state.connected = true;
    state.accounts = vec![account(1)];

    let next = apply_event(
        &state,
        &SessionEventKind::SessionUpdated {
            chain_id: 5,
            accounts: vec![account(9)],
        },
    );
    assert!(next.connected);
    assert_eq!(next.chain_id, 5);
    assert_eq!(next.accounts, vec![account(9)]);

    // An update before any connect leaves the session not-yet-connected.
    let cold = apply_event(
        &SessionState::default(),
        &SessionEventKind::SessionUpdated {
            chain_id: 5,
            accounts: vec![account(9)],
        },
    );
    assert!(!cold.connected);
}

#[test]
fn disconnect_resets_unconditionally() {
    let mut state = SessionState::default();
    state.connected = true;
    state.chain_id = 137;
    state.accounts = vec![account(1)];
    state.fetching = true;
    state.pending_request = true;

    let next = apply_event(&state, &SessionEventKind::Disconnected);
    assert_eq!(next, SessionState::default());
}

#[test]
fn disconnect_wins_over_preceding_events() {
    let mut state = SessionState::default();
    for event in [
        SessionEventKind::Connected {
            chain_id: 42,
            accounts: vec![account(7)],
        },
        SessionEventKind::SessionUpdated {
            chain_id: 43,
            accounts: vec![account(8)],
        },
        SessionEventKind::Disconnected,
    ] {
        state = apply_event(&state, &event);
    }
    assert_eq!(state, SessionState::default());
}
