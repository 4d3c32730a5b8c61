use alloy::primitives::{Address, Bytes, B256};
use thiserror::Error;

use crate::domain::{
    AccountAsset, GasPrices, RegistryRecord, SessionEvent, SessionInfo, TxRequest,
};

#[derive(Debug, Error)]
pub enum PortError {
    /// Session-level failure from the bridge; fatal to the current flow.
    #[error("bridge error: {0}")]
    Bridge(String),
    /// The user declined the signing request in their wallet.
    #[error("request rejected by signer")]
    Rejected,
    /// Gas/nonce/asset or registry read failure.
    #[error("network error: {0}")]
    Network(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
}

/// The wallet-session bridge. Pairing, transport and the wallet itself are
/// the implementation's concern; this contract covers only requests,
/// responses and lifecycle events.
pub trait BridgePort {
    fn create_session(&self) -> Result<SessionInfo, PortError>;
    fn kill_session(&self) -> Result<(), PortError>;
    fn session_info(&self) -> Result<SessionInfo, PortError>;

    fn send_transaction(&self, tx: &TxRequest) -> Result<B256, PortError>;
    fn sign_transaction(&self, tx: &TxRequest) -> Result<Bytes, PortError>;
    /// Sign a 32-byte digest as-is (legacy/standard `eth_sign`).
    fn sign_message(&self, address: Address, hash: B256) -> Result<Bytes, PortError>;
    /// Sign a raw message with the EIP-191 prefix applied by the wallet.
    fn sign_personal_message(&self, address: Address, message: &[u8]) -> Result<Bytes, PortError>;
    fn sign_typed_data(&self, address: Address, typed_data_json: &str)
        -> Result<Bytes, PortError>;

    /// Take all queued lifecycle events, in emission order.
    fn drain_events(&self) -> Result<Vec<SessionEvent>, PortError>;
}

/// Read-only chain data, each call keyed by (address, chain_id).
pub trait ChainReadPort {
    fn account_assets(&self, address: Address, chain_id: u64)
        -> Result<Vec<AccountAsset>, PortError>;
    fn gas_prices(&self) -> Result<GasPrices, PortError>;
    fn account_nonce(&self, address: Address, chain_id: u64) -> Result<u64, PortError>;
}

/// The on-chain registry's single view method.
pub trait RegistryPort {
    fn get_uri(&self, key: B256) -> Result<RegistryRecord, PortError>;
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
}
