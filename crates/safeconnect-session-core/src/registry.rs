//! Registry query normalization, lookup-key derivation and classification.

use alloy::primitives::{keccak256, FixedBytes, B256};
use alloy::sol_types::SolValue;

use crate::domain::{Classification, RegistryQuery, RegistryRecord};

/// bytes4("VERIFIED")
pub const STATUS_VERIFIED: FixedBytes<4> = FixedBytes::new([0x3b, 0x90, 0x99, 0x87]);
/// bytes4("WARNING")
pub const STATUS_WARNING: FixedBytes<4> = FixedBytes::new([0x51, 0xaa, 0xc2, 0x53]);

/// Derive the canonical (protocol, host, origin) triple from free-text input.
///
/// An input carrying an "https://" scheme is split once on "://" and used
/// verbatim as the origin; anything else is treated as a bare host under
/// https.
pub fn normalize_input(input: &str) -> RegistryQuery {
    if input.contains("https://") {
        let (protocol, host) = input.split_once("://").unwrap_or(("https", input));
        RegistryQuery {
            protocol: protocol.to_owned(),
            host: host.to_owned(),
            origin: input.to_owned(),
        }
    } else {
        RegistryQuery {
            protocol: "https".to_owned(),
            host: input.to_owned(),
            origin: format!("https://{input}"),
        }
    }
}

/// The contract key is keccak256 over the ABI encoding of the three
/// component hashes (three bytes32 values, so their concatenation).
pub fn lookup_key(query: &RegistryQuery) -> B256 {
    let protocol_hash = keccak256(query.protocol.as_bytes());
    let host_hash = keccak256(query.host.as_bytes());
    let origin_hash = keccak256(query.origin.as_bytes());
    keccak256((protocol_hash, host_hash, origin_hash).abi_encode())
}

/// Classify a returned record against the query that produced it.
///
/// The record is trusted only if its triple exactly matches the query; a
/// default record from a lookup miss or a collision therefore degrades to
/// `Error` instead of leaking a stale status.
pub fn classify(query: &RegistryQuery, record: &RegistryRecord) -> Classification {
    if record.protocol != query.protocol
        || record.host != query.host
        || record.origin != query.origin
    {
        return Classification::Error;
    }
    if record.status == STATUS_VERIFIED {
        Classification::Verified
    } else if record.status == STATUS_WARNING {
        Classification::Warning
    } else {
        Classification::Error
    }
}

/// Text injected back into the page for the given classification.
pub fn render_output(input: &str, classification: Classification) -> String {
    match classification {
        Classification::Verified => format!("{input} IS VERIFIED"),
        Classification::Warning => format!("{input} IS WARNING"),
        Classification::Error => format!("{input} IS SCAM"),
    }
}
