use alloy::primitives::Address;

/// Runtime configuration shared by the session adapters. Defaults point at
/// the public registry deployment; every field can be overridden through the
/// environment.
#[derive(Debug, Clone)]
pub struct SessionAdapterConfig {
    /// JSON-RPC relay for the wallet bridge. When unset the bridge runs in
    /// its deterministic in-process mode.
    pub bridge_url: Option<String>,
    /// REST base for account assets / gas prices / nonce. When unset the
    /// chain reader runs deterministically.
    pub chain_api_base_url: Option<String>,
    pub registry_rpc_url: String,
    pub registry_address: Address,
    pub request_timeout_ms: u64,
    /// Origin of the page hosting the demo, fed to the personal-sign trust
    /// indicator.
    pub page_origin: String,
}

impl Default for SessionAdapterConfig {
    fn default() -> Self {
        Self {
            bridge_url: None,
            chain_api_base_url: None,
            registry_rpc_url: "https://kovan.optimism.io".to_owned(),
            registry_address: "0xdf08F459e2C6e1886B2976BB175D2264E7D734C3"
                .parse()
                .expect("valid built-in registry address"),
            request_timeout_ms: 15_000,
            page_origin: "http://localhost:3000/".to_owned(),
        }
    }
}

impl SessionAdapterConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SAFECONNECT_BRIDGE_URL") {
            if !url.is_empty() {
                config.bridge_url = Some(url);
            }
        }
        if let Ok(url) = std::env::var("SAFECONNECT_CHAIN_API_URL") {
            if !url.is_empty() {
                config.chain_api_base_url = Some(url);
            }
        }
        if let Ok(url) = std::env::var("SAFECONNECT_REGISTRY_RPC_URL") {
            if !url.is_empty() {
                config.registry_rpc_url = url;
            }
        }
        if let Ok(raw) = std::env::var("SAFECONNECT_REGISTRY_ADDRESS") {
            if let Ok(address) = raw.parse() {
                config.registry_address = address;
            }
        }
        if let Ok(raw) = std::env::var("SAFECONNECT_REQUEST_TIMEOUT_MS") {
            if let Ok(timeout) = raw.parse() {
                config.request_timeout_ms = timeout;
            }
        }
        if let Ok(origin) = std::env::var("SAFECONNECT_PAGE_ORIGIN") {
            if !origin.is_empty() {
                config.page_origin = origin;
            }
        }
        config
    }
}
