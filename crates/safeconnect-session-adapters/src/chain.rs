use alloy::primitives::Address;
use serde::Deserialize;

use safeconnect_session_core::{AccountAsset, ChainReadPort, GasPrice, GasPrices, PortError};

use crate::SessionAdapterConfig;

/// Read-only chain data adapter: account assets, gas tiers and nonce.
///
/// HTTP mode talks to the demo's REST endpoints; deterministic mode serves
/// fixed values for tests and offline runs.
#[derive(Debug, Clone)]
pub struct ChainReadAdapter {
    mode: ChainReadMode,
}

#[derive(Debug, Clone)]
enum ChainReadMode {
    Deterministic,
    Http(HttpRuntime),
}

#[derive(Debug, Clone)]
struct HttpRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Every endpoint wraps its payload in a result envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    result: T,
}

impl Default for ChainReadAdapter {
    fn default() -> Self {
        Self::with_config(SessionAdapterConfig::default())
    }
}

impl ChainReadAdapter {
    pub fn with_config(config: SessionAdapterConfig) -> Self {
        let mode = match config.chain_api_base_url {
            Some(base_url) => {
                let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
                match reqwest::blocking::Client::builder().timeout(timeout).build() {
                    Ok(client) => ChainReadMode::Http(HttpRuntime { base_url, client }),
                    Err(e) => {
                        tracing::warn!("chain api client init failed, using deterministic reads: {e}");
                        ChainReadMode::Deterministic
                    }
                }
            }
            None => ChainReadMode::Deterministic,
        };
        Self { mode }
    }

    fn http_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PortError> {
        let http = match &self.mode {
            ChainReadMode::Http(http) => http,
            ChainReadMode::Deterministic => {
                return Err(PortError::NotImplemented("chain api http mode not enabled"))
            }
        };
        let url = format!("{}/{}", http.base_url.trim_end_matches('/'), path);
        let response = http
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| PortError::Network(format!("chain api request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(PortError::Network(format!(
                "chain api status {} for {path}",
                response.status()
            )));
        }
        let envelope: ApiEnvelope<T> = response
            .json()
            .map_err(|e| PortError::Network(format!("chain api json decode failed: {e}")))?;
        Ok(envelope.result)
    }
}

impl ChainReadPort for ChainReadAdapter {
    fn account_assets(
        &self,
        address: Address,
        chain_id: u64,
    ) -> Result<Vec<AccountAsset>, PortError> {
        if matches!(self.mode, ChainReadMode::Http(_)) {
            return self.http_get(
                "account-assets",
                &[
                    ("address", address.to_string()),
                    ("chainId", chain_id.to_string()),
                ],
            );
        }

        Ok(vec![AccountAsset {
            symbol: "ETH".to_owned(),
            name: "Ethereum".to_owned(),
            decimals: 18,
            contract_address: None,
            balance: "1000000000000000000".to_owned(),
        }])
    }

    fn gas_prices(&self) -> Result<GasPrices, PortError> {
        if matches!(self.mode, ChainReadMode::Http(_)) {
            return self.http_get("gas-prices", &[]);
        }

        Ok(GasPrices {
            slow: GasPrice {
                time: 10.0,
                price: 2.0,
            },
            average: GasPrice {
                time: 5.0,
                price: 4.0,
            },
            fast: GasPrice {
                time: 1.0,
                price: 8.0,
            },
        })
    }

    fn account_nonce(&self, address: Address, chain_id: u64) -> Result<u64, PortError> {
        if matches!(self.mode, ChainReadMode::Http(_)) {
            return self.http_get(
                "account-nonce",
                &[
                    ("address", address.to_string()),
                    ("chainId", chain_id.to_string()),
                ],
            );
        }

        Ok(7)
    }
}
