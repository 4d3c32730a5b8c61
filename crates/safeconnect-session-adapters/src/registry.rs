use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256};
use alloy::sol;
use alloy::sol_types::SolCall;
use serde_json::Value;

use safeconnect_session_core::{
    lookup_key, PortError, RegistryPort, RegistryQuery, RegistryRecord,
};

use crate::SessionAdapterConfig;

sol! {
    struct UriData {
        string protocol;
        string host;
        string origin;
        address maker;
        bytes4 dataType;
        bytes4 status;
    }

    function getUri(bytes32 uriId) external view returns (UriData memory);
}

/// Registry contract adapter.
///
/// RPC mode issues a read-only `eth_call` against the registry deployment;
/// in-memory mode serves records from a map keyed the same way the contract
/// keys them, and mirrors the contract's behavior of returning a default
/// record on a miss.
#[derive(Debug, Clone)]
pub struct RegistryAdapter {
    mode: RegistryMode,
}

#[derive(Debug, Clone)]
enum RegistryMode {
    InMemory(Arc<Mutex<HashMap<B256, RegistryRecord>>>),
    Rpc(RpcRuntime),
}

#[derive(Debug, Clone)]
struct RpcRuntime {
    url: String,
    contract: Address,
    client: reqwest::blocking::Client,
}

impl Default for RegistryAdapter {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl RegistryAdapter {
    pub fn in_memory() -> Self {
        Self {
            mode: RegistryMode::InMemory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    pub fn with_config(config: SessionAdapterConfig) -> Result<Self, PortError> {
        let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Network(format!("registry client init failed: {e}")))?;
        Ok(Self {
            mode: RegistryMode::Rpc(RpcRuntime {
                url: config.registry_rpc_url,
                contract: config.registry_address,
                client,
            }),
        })
    }

    /// Seed the in-memory registry, keying the record by its own triple.
    pub fn insert_record(&self, record: RegistryRecord) -> Result<(), PortError> {
        let RegistryMode::InMemory(map) = &self.mode else {
            return Err(PortError::NotImplemented("registry rpc mode is read-only"));
        };
        let key = lookup_key(&RegistryQuery {
            protocol: record.protocol.clone(),
            host: record.host.clone(),
            origin: record.origin.clone(),
        });
        let mut g = map
            .lock()
            .map_err(|e| PortError::Network(format!("registry lock poisoned: {e}")))?;
        g.insert(key, record);
        Ok(())
    }

    fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, PortError> {
        let RegistryMode::Rpc(rpc) = &self.mode else {
            return Err(PortError::NotImplemented("registry rpc mode not enabled"));
        };

        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                {
                    "to": rpc.contract.to_string(),
                    "data": format!("0x{}", alloy::hex::encode(data)),
                },
                "latest",
            ],
        });
        let response = rpc
            .client
            .post(&rpc.url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Network(format!("registry call failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Network(format!("registry json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Network(format!("registry status {status}: {body}")));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Network(format!("registry rpc error: {err}")));
        }
        let raw = body
            .get("result")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PortError::Network("registry response missing result".to_owned()))?;
        alloy::hex::decode(raw)
            .map_err(|e| PortError::Network(format!("registry result hex decode failed: {e}")))
    }
}

impl RegistryPort for RegistryAdapter {
    fn get_uri(&self, key: B256) -> Result<RegistryRecord, PortError> {
        match &self.mode {
            RegistryMode::InMemory(map) => {
                let g = map
                    .lock()
                    .map_err(|e| PortError::Network(format!("registry lock poisoned: {e}")))?;
                // A miss yields the contract's default record, not an error;
                // classification catches it through the exact-match check.
                Ok(g.get(&key).cloned().unwrap_or_default())
            }
            RegistryMode::Rpc(_) => {
                let encoded = getUriCall { uriId: key }.abi_encode();
                let returned = self.eth_call(encoded)?;
                let decoded = getUriCall::abi_decode_returns(&returned, true)
                    .map_err(|e| PortError::Network(format!("registry abi decode failed: {e}")))?;
                Ok(record_from_uri_data(decoded._0))
            }
        }
    }
}

fn record_from_uri_data(data: UriData) -> RegistryRecord {
    RegistryRecord {
        protocol: data.protocol,
        host: data.host,
        origin: data.origin,
        maker: data.maker,
        data_type: data.dataType,
        status: data.status,
    }
}
