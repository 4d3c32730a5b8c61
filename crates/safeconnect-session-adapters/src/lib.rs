pub mod bridge;
pub mod chain;
pub mod clock;
pub mod config;
pub mod registry;

pub use bridge::WalletBridgeAdapter;
pub use chain::ChainReadAdapter;
pub use clock::SystemClockAdapter;
pub use config::SessionAdapterConfig;
pub use registry::RegistryAdapter;
