#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::Address;

use safeconnect_session_adapters::{ChainReadAdapter, RegistryAdapter, WalletBridgeAdapter};
use safeconnect_session_core::{ClockPort, Orchestrator, PortError, RegistryRecord};

#[derive(Debug, Default)]
pub struct TestClock {
    now: AtomicU64,
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.fetch_add(1, Ordering::SeqCst) + 1_739_750_400_000)
    }
}

pub type TestOrchestrator =
    Orchestrator<WalletBridgeAdapter, ChainReadAdapter, RegistryAdapter, TestClock>;

pub fn new_orchestrator() -> TestOrchestrator {
    new_orchestrator_with_origin("http://localhost:3000/")
}

pub fn new_orchestrator_with_origin(page_origin: &str) -> TestOrchestrator {
    Orchestrator::new(
        WalletBridgeAdapter::default(),
        ChainReadAdapter::default(),
        RegistryAdapter::in_memory(),
        TestClock::default(),
        page_origin,
    )
}

pub fn connect(orch: &mut TestOrchestrator) -> Address {
    orch.connect().expect("connect session");
    orch.pump_events().expect("pump connect events");
    orch.session().address().expect("connected account")
}

pub fn verified_record(host: &str) -> RegistryRecord {
    RegistryRecord {
        protocol: "https".to_owned(),
        host: host.to_owned(),
        origin: format!("https://{host}"),
        maker: Address::with_last_byte(0xAA),
        data_type: alloy::primitives::FixedBytes::new([0, 0, 0, 1]),
        status: safeconnect_session_core::STATUS_VERIFIED,
    }
}

pub fn warning_record(host: &str) -> RegistryRecord {
    RegistryRecord {
        status: safeconnect_session_core::STATUS_WARNING,
        ..verified_record(host)
    }
}
