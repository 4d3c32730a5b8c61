use alloy::primitives::{keccak256, Address, FixedBytes};

use safeconnect_session_core::{
    classify, lookup_key, normalize_input, render_output, Classification, RegistryRecord,
    STATUS_VERIFIED, STATUS_WARNING,
};

fn record_for(query: &safeconnect_session_core::RegistryQuery, status: FixedBytes<4>) -> RegistryRecord {
    RegistryRecord {
        protocol: query.protocol.clone(),
        host: query.host.clone(),
        origin: query.origin.clone(),
        maker: Address::with_last_byte(0xAA),
        data_type: FixedBytes::new([0, 0, 0, 1]),
        status,
    }
}

#[test]
fn bare_host_input_normalizes_under_https() {
    let query = normalize_input("www.opensea.io");
    assert_eq!(query.protocol, "https");
    assert_eq!(query.host, "www.opensea.io");
    assert_eq!(query.origin, "https://www.opensea.io");
}

#[test]
fn full_url_input_splits_on_scheme_separator() {
    let query = normalize_input("https://example.com/path");
    assert_eq!(query.protocol, "https");
    assert_eq!(query.host, "example.com/path");
    assert_eq!(query.origin, "https://example.com/path");
}

#[test]
fn http_scheme_input_is_treated_as_bare_host() {
    // Only "https://" triggers the scheme split; anything else is a host.
    let query = normalize_input("http://example.com");
    assert_eq!(query.protocol, "https");
    assert_eq!(query.host, "http://example.com");
    assert_eq!(query.origin, "https://http://example.com");
}

#[test]
fn lookup_key_is_double_hash_of_component_hashes() {
    let query = normalize_input("www.opensea.io");
    let mut encoded = Vec::with_capacity(96);
    encoded.extend_from_slice(keccak256("https").as_slice());
    encoded.extend_from_slice(keccak256("www.opensea.io").as_slice());
    encoded.extend_from_slice(keccak256("https://www.opensea.io").as_slice());
    assert_eq!(lookup_key(&query), keccak256(encoded));
}

#[test]
fn status_codes_map_to_classifications() {
    let query = normalize_input("www.opensea.io");
    assert_eq!(
        classify(&query, &record_for(&query, STATUS_VERIFIED)),
        Classification::Verified
    );
    assert_eq!(
        classify(&query, &record_for(&query, STATUS_WARNING)),
        Classification::Warning
    );
    assert_eq!(
        classify(&query, &record_for(&query, FixedBytes::ZERO)),
        Classification::Error
    );
    assert_eq!(
        classify(&query, &record_for(&query, FixedBytes::new([0xde, 0xad, 0xbe, 0xef]))),
        Classification::Error
    );
}

#[test]
fn mismatched_record_fields_always_classify_as_error() {
    let query = normalize_input("www.opensea.io");

    let mut wrong_host = record_for(&query, STATUS_VERIFIED);
    wrong_host.host = "www.opensae.io".to_owned();
    assert_eq!(classify(&query, &wrong_host), Classification::Error);

    let mut wrong_protocol = record_for(&query, STATUS_VERIFIED);
    wrong_protocol.protocol = "http".to_owned();
    assert_eq!(classify(&query, &wrong_protocol), Classification::Error);

    let mut wrong_origin = record_for(&query, STATUS_VERIFIED);
    wrong_origin.origin = "https://www.opensea.io/".to_owned();
    assert_eq!(classify(&query, &wrong_origin), Classification::Error);

    // The default record a contract returns on a miss never passes.
    assert_eq!(
        classify(&query, &RegistryRecord::default()),
        Classification::Error
    );
}

#[test]
fn output_text_per_classification() {
    assert_eq!(
        render_output("www.opensea.io", Classification::Verified),
        "www.opensea.io IS VERIFIED"
    );
    assert_eq!(
        render_output("www.rarible.com", Classification::Warning),
        "www.rarible.com IS WARNING"
    );
    assert_eq!(
        render_output("www.evil.example", Classification::Error),
        "www.evil.example IS SCAM"
    );
}
