use alloy::primitives::{Address, Bytes, B256};

use safeconnect_session_core::{
    personal_sign_text, RegistryRecord, SessionEvent, SessionEventKind, SignResult, TxRequest,
    TRUSTED_ORIGINS,
};

#[test]
fn tx_request_serializes_with_camel_case_wire_fields() {
    let address: Address = "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("address parse");
    let tx = TxRequest {
        from: address,
        to: address,
        nonce: "0x7".to_owned(),
        gas_price: "0x77359400".to_owned(),
        gas_limit: "0x5208".to_owned(),
        value: "0x0".to_owned(),
        data: "0x".to_owned(),
    };

    let value = serde_json::to_value(&tx).expect("serialize tx");
    assert_eq!(value["gasPrice"], "0x77359400");
    assert_eq!(value["gasLimit"], "0x5208");
    assert_eq!(value["value"], "0x0");

    let back: TxRequest = serde_json::from_value(value).expect("deserialize tx");
    assert_eq!(back, tx);
}

#[test]
fn session_event_round_trips() {
    let event = SessionEvent {
        sequence: 3,
        kind: SessionEventKind::SessionUpdated {
            chain_id: 10,
            accounts: vec![Address::with_last_byte(1)],
        },
    };
    let json = serde_json::to_string(&event).expect("serialize event");
    let back: SessionEvent = serde_json::from_str(&json).expect("deserialize event");
    assert_eq!(back, event);
}

#[test]
fn sign_result_round_trips_and_exposes_display_rows() {
    let result = SignResult::PersonalSign {
        address: Address::with_last_byte(2),
        valid: true,
        signature: Bytes::from(vec![0x41; 65]),
    };
    let json = serde_json::to_string(&result).expect("serialize result");
    let back: SignResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(back, result);

    let rows = result.display_rows();
    assert_eq!(rows[0], ("method", "personal_sign".to_owned()));
    assert!(rows.iter().any(|(k, v)| *k == "valid" && v == "true"));
}

#[test]
fn send_transaction_result_reports_tx_hash() {
    let result = SignResult::SendTransaction {
        tx_hash: B256::with_last_byte(9),
        from: Address::with_last_byte(1),
        to: Address::with_last_byte(1),
        value: "0 ETH".to_owned(),
    };
    let rows = result.display_rows();
    assert_eq!(rows[0], ("method", "eth_sendTransaction".to_owned()));
    assert!(rows.iter().any(|(k, _)| *k == "txHash"));
}

#[test]
fn registry_record_round_trips() {
    let record = RegistryRecord {
        protocol: "https".to_owned(),
        host: "www.opensea.io".to_owned(),
        origin: "https://www.opensea.io".to_owned(),
        maker: Address::with_last_byte(7),
        data_type: alloy::primitives::FixedBytes::new([0, 0, 0, 1]),
        status: safeconnect_session_core::STATUS_VERIFIED,
    };
    let json = serde_json::to_string(&record).expect("serialize record");
    let back: RegistryRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(back, record);
}

#[test]
fn personal_sign_text_branches_on_origin_only() {
    for origin in TRUSTED_ORIGINS {
        let text = personal_sign_text(origin);
        assert!(text.starts_with("TRUSTED WEBSITE"));
        assert!(text.contains(origin));
    }
    let danger = personal_sign_text("https://www.evil.example/");
    assert!(danger.starts_with("DANGER!!!"));
}
