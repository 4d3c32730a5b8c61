use alloy::primitives::{Address, Bytes, FixedBytes, B256};
use serde::{Deserialize, Serialize};

/// Request methods exposed by the wallet-session bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignMethod {
    EthSendTransaction,
    EthSignTransaction,
    EthSignLegacy,
    EthSignStandard,
    PersonalSign,
    EthSignTypedData,
}

impl SignMethod {
    /// Label shown in the result modal, matching the wire method names.
    pub fn display_name(self) -> &'static str {
        match self {
            SignMethod::EthSendTransaction => "eth_sendTransaction",
            SignMethod::EthSignTransaction => "eth_signTransaction",
            SignMethod::EthSignLegacy => "eth_sign (legacy)",
            SignMethod::EthSignStandard => "eth_sign (standard)",
            SignMethod::PersonalSign => "personal_sign",
            SignMethod::EthSignTypedData => "eth_signTypedData",
        }
    }
}

/// Mirror of the wallet session, owned by the orchestrator and mutated only
/// through reducer transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub connected: bool,
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub fetching: bool,
    pub pending_request: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            connected: false,
            chain_id: 1,
            accounts: Vec::new(),
            fetching: false,
            pending_request: false,
        }
    }
}

impl SessionState {
    /// The active account is always the first session account.
    pub fn address(&self) -> Option<Address> {
        self.accounts.first().copied()
    }
}

/// Lifecycle events emitted by the bridge, consumed in drain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    SessionUpdated { chain_id: u64, accounts: Vec<Address> },
    Connected { chain_id: u64, accounts: Vec<Address> },
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub sequence: u64,
    pub kind: SessionEventKind,
}

/// Snapshot of the bridge's view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub connected: bool,
    pub chain_id: u64,
    pub accounts: Vec<Address>,
}

/// Transaction payload forwarded to the bridge. Numeric fields are canonical
/// minimal hex strings ("0x0", never "0x00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub nonce: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub value: String,
    pub data: String,
}

/// Outcome of one signing operation. One variant per operation kind; the
/// shell displays exactly one of these at a time and discards it on close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignResult {
    SendTransaction {
        tx_hash: B256,
        from: Address,
        to: Address,
        value: String,
    },
    SignTransaction {
        from: Address,
        to: Address,
        value: String,
        raw: Bytes,
    },
    LegacySign {
        address: Address,
        valid: bool,
        signature: Bytes,
    },
    StandardSign {
        address: Address,
        valid: bool,
        signature: Bytes,
    },
    PersonalSign {
        address: Address,
        valid: bool,
        signature: Bytes,
    },
    TypedData {
        address: Address,
        valid: bool,
        signature: Bytes,
    },
}

impl SignResult {
    pub fn method(&self) -> SignMethod {
        match self {
            SignResult::SendTransaction { .. } => SignMethod::EthSendTransaction,
            SignResult::SignTransaction { .. } => SignMethod::EthSignTransaction,
            SignResult::LegacySign { .. } => SignMethod::EthSignLegacy,
            SignResult::StandardSign { .. } => SignMethod::EthSignStandard,
            SignResult::PersonalSign { .. } => SignMethod::PersonalSign,
            SignResult::TypedData { .. } => SignMethod::EthSignTypedData,
        }
    }

    /// Key/value rows for the result modal.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("method", self.method().display_name().to_owned())];
        match self {
            SignResult::SendTransaction {
                tx_hash,
                from,
                to,
                value,
            } => {
                rows.push(("txHash", tx_hash.to_string()));
                rows.push(("from", from.to_string()));
                rows.push(("to", to.to_string()));
                rows.push(("value", value.clone()));
            }
            SignResult::SignTransaction {
                from,
                to,
                value,
                raw,
            } => {
                rows.push(("from", from.to_string()));
                rows.push(("to", to.to_string()));
                rows.push(("value", value.clone()));
                rows.push(("result", raw.to_string()));
            }
            SignResult::LegacySign {
                address,
                valid,
                signature,
            }
            | SignResult::StandardSign {
                address,
                valid,
                signature,
            }
            | SignResult::PersonalSign {
                address,
                valid,
                signature,
            }
            | SignResult::TypedData {
                address,
                valid,
                signature,
            } => {
                rows.push(("address", address.to_string()));
                rows.push(("valid", valid.to_string()));
                rows.push(("result", signature.to_string()));
            }
        }
        rows
    }
}

/// One asset row from the account balance listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAsset {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub contract_address: Option<Address>,
    pub balance: String,
}

/// One gas price tier; `price` is denominated in gwei.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPrice {
    pub time: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPrices {
    pub slow: GasPrice,
    pub average: GasPrice,
    pub fast: GasPrice,
}

/// Canonical (protocol, host, origin) triple derived from free-text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryQuery {
    pub protocol: String,
    pub host: String,
    pub origin: String,
}

/// Record returned by the registry contract's `getUri` view call. The
/// contract returns a default (all-zero) record on a lookup miss, so the
/// triple must be re-checked against the query before the status is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    pub protocol: String,
    pub host: String,
    pub origin: String,
    pub maker: Address,
    pub data_type: FixedBytes<4>,
    pub status: FixedBytes<4>,
}

impl Default for RegistryRecord {
    fn default() -> Self {
        Self {
            protocol: String::new(),
            host: String::new(),
            origin: String::new(),
            maker: Address::ZERO,
            data_type: FixedBytes::ZERO,
            status: FixedBytes::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Verified,
    Warning,
    Error,
}
