mod common;

use alloy::primitives::Address;

use safeconnect_session_core::SessionState;

use common::{connect, new_orchestrator};

#[test]
fn connect_mirrors_bridge_session_into_state() {
    let mut orch = new_orchestrator();
    assert!(!orch.session().connected);

    let address = connect(&mut orch);
    assert!(orch.session().connected);
    assert_eq!(orch.session().chain_id, 1);
    assert_eq!(orch.session().address(), Some(address));

    // The session account is the bridge's built-in signer.
    assert_eq!(
        orch.bridge.deterministic_address().expect("built-in signer"),
        address
    );
}

#[test]
fn connect_reuses_live_session() {
    let mut orch = new_orchestrator();
    let first = connect(&mut orch);

    // A second connect must not tear anything down.
    orch.connect().expect("reconnect");
    orch.pump_events().expect("pump");
    assert!(orch.session().connected);
    assert_eq!(orch.session().address(), Some(first));
}

#[test]
fn session_update_event_propagates_chain_and_accounts() {
    let mut orch = new_orchestrator();
    connect(&mut orch);

    let replacement = Address::with_last_byte(0x42);
    orch.bridge
        .debug_inject_session_update(10, vec![replacement])
        .expect("inject session update");
    orch.pump_events().expect("pump update");

    assert!(orch.session().connected);
    assert_eq!(orch.session().chain_id, 10);
    assert_eq!(orch.session().address(), Some(replacement));
}

#[test]
fn disconnect_event_resets_state_and_bumps_epoch() {
    let mut orch = new_orchestrator();
    connect(&mut orch);
    let epoch_before = orch.session_epoch();

    orch.bridge
        .debug_inject_disconnect()
        .expect("inject disconnect");
    orch.pump_events().expect("pump disconnect");

    assert_eq!(*orch.session(), SessionState::default());
    assert_eq!(orch.session_epoch(), epoch_before + 1);
}

#[test]
fn disconnect_wins_over_interleaved_update() {
    let mut orch = new_orchestrator();
    connect(&mut orch);

    orch.bridge
        .debug_inject_session_update(137, vec![Address::with_last_byte(9)])
        .expect("inject update");
    orch.bridge
        .debug_inject_disconnect()
        .expect("inject disconnect");
    orch.pump_events().expect("pump both");

    assert_eq!(*orch.session(), SessionState::default());
}

#[test]
fn kill_session_restores_initial_state() {
    let mut orch = new_orchestrator();
    connect(&mut orch);
    let epoch_before = orch.session_epoch();

    orch.kill_session().expect("kill session");

    let state = orch.session();
    assert!(!state.connected);
    assert_eq!(state.chain_id, 1);
    assert!(state.accounts.is_empty());
    assert_eq!(state.address(), None);
    assert!(!state.fetching);
    assert!(!state.pending_request);
    assert_eq!(orch.session_epoch(), epoch_before + 1);
}

#[test]
fn fetch_assets_returns_listing_and_clears_fetching_flag() {
    let mut orch = new_orchestrator();
    connect(&mut orch);

    let assets = orch.fetch_assets().expect("fetch assets");
    assert!(!assets.is_empty());
    assert_eq!(assets[0].symbol, "ETH");
    assert!(!orch.session().fetching);
}
