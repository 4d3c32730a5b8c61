mod common;

use safeconnect_session_core::{Classification, LookupState};

use common::{new_orchestrator, verified_record, warning_record};

#[test]
fn seeded_record_classifies_as_verified() {
    let mut orch = new_orchestrator();
    orch.registry
        .insert_record(verified_record("www.opensea.io"))
        .expect("seed record");

    let (classification, output) = orch.classify_input("www.opensea.io").expect("classify");
    assert_eq!(classification, Classification::Verified);
    assert_eq!(output, "www.opensea.io IS VERIFIED");
    assert_eq!(
        orch.lookup_state(),
        LookupState::Classified(Classification::Verified)
    );
}

#[test]
fn seeded_record_classifies_as_warning() {
    let mut orch = new_orchestrator();
    orch.registry
        .insert_record(warning_record("sketchy.example"))
        .expect("seed record");

    let (classification, output) = orch.classify_input("sketchy.example").expect("classify");
    assert_eq!(classification, Classification::Warning);
    assert_eq!(output, "sketchy.example IS WARNING");
}

#[test]
fn unknown_input_classifies_as_scam() {
    let mut orch = new_orchestrator();

    let (classification, output) = orch.classify_input("phish.example").expect("classify");
    assert_eq!(classification, Classification::Error);
    assert_eq!(output, "phish.example IS SCAM");
    assert_eq!(
        orch.lookup_state(),
        LookupState::Classified(Classification::Error)
    );
}

#[test]
fn explicit_url_input_matches_its_seeded_triple() {
    let mut orch = new_orchestrator();
    orch.registry
        .insert_record(verified_record("example.com"))
        .expect("seed record");

    // The seeded origin is "https://example.com", so the explicit form must
    // carry the same origin to match.
    let (classification, _) = orch
        .classify_input("https://example.com")
        .expect("classify");
    assert_eq!(classification, Classification::Verified);
}

#[test]
fn host_only_and_url_forms_use_different_keys() {
    let mut orch = new_orchestrator();
    orch.registry
        .insert_record(verified_record("example.com"))
        .expect("seed record");

    // A path suffix changes the host portion of the key, so nothing matches.
    let (classification, _) = orch
        .classify_input("https://example.com/login")
        .expect("classify");
    assert_eq!(classification, Classification::Error);
}

#[test]
fn lookup_survives_session_reset() {
    let mut orch = new_orchestrator();
    orch.registry
        .insert_record(verified_record("www.opensea.io"))
        .expect("seed record");

    let (classification, _) = orch.classify_input("www.opensea.io").expect("classify");
    assert_eq!(classification, Classification::Verified);

    orch.kill_session().expect("kill session");
    assert_eq!(orch.lookup_state(), LookupState::Idle);

    // Classification does not need a wallet session.
    let (classification, _) = orch.classify_input("www.opensea.io").expect("reclassify");
    assert_eq!(classification, Classification::Verified);
}
