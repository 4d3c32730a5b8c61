//! Local hashing and signature verification.
//!
//! Signatures come back from the wallet as opaque 65-byte blobs; every
//! signing operation recomputes the expected digest here and checks that the
//! signature recovers the claimed address before reporting `valid`.

use alloy::dyn_abi::TypedData;
use alloy::primitives::{eip191_hash_message, Address, PrimitiveSignature, B256, U256};

use crate::ports::PortError;

/// EIP-191 prefixed hash of a plain string message.
pub fn message_hash(message: &str) -> B256 {
    eip191_hash_message(message.as_bytes())
}

/// EIP-712 signing hash of a serialized typed-data document.
pub fn typed_data_hash(typed_data_json: &str) -> Result<B256, PortError> {
    let typed: TypedData = serde_json::from_str(typed_data_json)
        .map_err(|e| PortError::Validation(format!("invalid typed data json: {e}")))?;
    typed
        .eip712_signing_hash()
        .map_err(|e| PortError::Validation(format!("typed data hash failed: {e}")))
}

/// Recover the signer from a 65-byte (r, s, v) signature over `hash` and
/// compare against the expected address. Malformed signatures are invalid,
/// never an error.
pub fn verify_signature(expected: Address, signature: &[u8], hash: B256) -> bool {
    let Ok(sig) = PrimitiveSignature::try_from(signature) else {
        return false;
    };
    match sig.recover_address_from_prehash(&hash) {
        Ok(recovered) => recovered == expected,
        Err(_) => false,
    }
}

/// Canonical minimal hex: no leading zeros, zero renders as "0x0".
pub fn sanitize_hex(value: U256) -> String {
    format!("0x{value:x}")
}

pub fn sanitize_hex_u64(value: u64) -> String {
    format!("0x{value:x}")
}

/// Gas tier prices arrive in gwei; the wire payload wants wei.
pub fn gwei_to_wei(price_gwei: f64) -> U256 {
    U256::from((price_gwei * 1_000_000_000.0).round() as u128)
}
