//! Bridge between the egui shell and the session workspace crates.
//! This must remain the only shell-facing boundary for session operations.

use std::sync::{Arc, Mutex, MutexGuard};

use safeconnect_session_adapters::{
    ChainReadAdapter, RegistryAdapter, SessionAdapterConfig, SystemClockAdapter,
    WalletBridgeAdapter,
};
use safeconnect_session_core::{
    AccountAsset, Classification, Orchestrator, PortError, RegistryRecord, SessionState,
    SignMethod, SignResult, STATUS_VERIFIED, STATUS_WARNING,
};

type SessionOrchestrator =
    Orchestrator<WalletBridgeAdapter, ChainReadAdapter, RegistryAdapter, SystemClockAdapter>;

#[derive(Clone)]
pub struct SessionBridge {
    orchestrator: Arc<Mutex<SessionOrchestrator>>,
}

impl Default for SessionBridge {
    fn default() -> Self {
        Self::with_config(SessionAdapterConfig::from_env())
    }
}

impl SessionBridge {
    pub fn with_config(config: SessionAdapterConfig) -> Self {
        let registry = if config.bridge_url.is_some() {
            RegistryAdapter::with_config(config.clone()).unwrap_or_else(|e| {
                tracing::warn!("registry rpc init failed, using the seeded demo registry: {e}");
                seeded_demo_registry()
            })
        } else {
            // No relay configured means a fully in-process demo run.
            seeded_demo_registry()
        };

        let page_origin = config.page_origin.clone();
        Self {
            orchestrator: Arc::new(Mutex::new(Orchestrator::new(
                WalletBridgeAdapter::with_config(config.clone()),
                ChainReadAdapter::with_config(config),
                registry,
                SystemClockAdapter,
                page_origin,
            ))),
        }
    }

    pub fn session(&self) -> Result<SessionState, PortError> {
        Ok(self.guard()?.session().clone())
    }

    pub fn session_epoch(&self) -> Result<u64, PortError> {
        Ok(self.guard()?.session_epoch())
    }

    pub fn connect(&self) -> Result<(), PortError> {
        let mut g = self.guard()?;
        g.connect()?;
        g.pump_events()
    }

    pub fn kill_session(&self) -> Result<(), PortError> {
        self.guard()?.kill_session()
    }

    pub fn pump_events(&self) -> Result<(), PortError> {
        self.guard()?.pump_events()
    }

    pub fn fetch_assets(&self) -> Result<Vec<AccountAsset>, PortError> {
        self.guard()?.fetch_assets()
    }

    pub fn run_operation(&self, method: SignMethod) -> Result<SignResult, PortError> {
        let mut g = self.guard()?;
        match method {
            SignMethod::EthSendTransaction => g.send_transaction(),
            SignMethod::EthSignTransaction => g.sign_transaction(),
            SignMethod::EthSignLegacy => g.legacy_sign_message(),
            SignMethod::EthSignStandard => g.standard_sign_message(),
            SignMethod::PersonalSign => g.personal_sign_message(),
            SignMethod::EthSignTypedData => g.sign_typed_data(),
        }
    }

    pub fn classify_input(&self, input: &str) -> Result<(Classification, String), PortError> {
        self.guard()?.classify_input(input)
    }

    fn guard(&self) -> Result<MutexGuard<'_, SessionOrchestrator>, PortError> {
        self.orchestrator
            .lock()
            .map_err(|e| PortError::Bridge(format!("session state lock poisoned: {e}")))
    }
}

/// In-memory registry with one record per classification so every output is
/// reachable offline. Unseeded inputs degrade to the scam output.
fn seeded_demo_registry() -> RegistryAdapter {
    let registry = RegistryAdapter::in_memory();
    let seeds = [
        ("www.opensea.io", STATUS_VERIFIED),
        ("app.uniswap.org", STATUS_VERIFIED),
        ("unaudited.example", STATUS_WARNING),
    ];
    for (host, status) in seeds {
        let record = RegistryRecord {
            protocol: "https".to_owned(),
            host: host.to_owned(),
            origin: format!("https://{host}"),
            maker: alloy::primitives::Address::with_last_byte(0x01),
            data_type: alloy::primitives::FixedBytes::new([0, 0, 0, 1]),
            status,
        };
        if let Err(e) = registry.insert_record(record) {
            tracing::warn!("failed to seed demo registry record for {host}: {e}");
        }
    }
    registry
}
