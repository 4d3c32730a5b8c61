pub mod domain;
pub mod hashing;
pub mod orchestrator;
pub mod ports;
pub mod registry;
pub mod state_machine;

pub use domain::{
    AccountAsset, Classification, GasPrice, GasPrices, RegistryQuery, RegistryRecord,
    SessionEvent, SessionEventKind, SessionInfo, SessionState, SignMethod, SignResult, TxRequest,
};
pub use hashing::{message_hash, sanitize_hex, sanitize_hex_u64, typed_data_hash, verify_signature};
pub use orchestrator::{
    personal_sign_text, typed_data_example, Orchestrator, LEGACY_SIGN_MESSAGE,
    TRANSFER_GAS_LIMIT, TRUSTED_ORIGINS,
};
pub use ports::{BridgePort, ChainReadPort, ClockPort, PortError, RegistryPort};
pub use registry::{
    classify, lookup_key, normalize_input, render_output, STATUS_VERIFIED, STATUS_WARNING,
};
pub use state_machine::{apply_event, LookupState};
