use std::sync::{Arc, Mutex};

use alloy::dyn_abi::TypedData;
use alloy::primitives::{keccak256, Address, Bytes, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use serde_json::Value;

use safeconnect_session_core::{
    BridgePort, PortError, SessionEvent, SessionEventKind, SessionInfo, TxRequest,
};

use crate::SessionAdapterConfig;

/// Wallet-session bridge adapter.
///
/// Deterministic mode keeps a built-in local signer so every request produces
/// a real, recoverable signature without any wallet attached; relay mode
/// forwards requests as JSON-RPC to a bridge endpoint and polls it for
/// lifecycle events.
#[derive(Debug, Clone)]
pub struct WalletBridgeAdapter {
    mode: BridgeMode,
    state: Arc<Mutex<BridgeState>>,
}

#[derive(Debug, Clone)]
enum BridgeMode {
    Deterministic,
    Relay(RelayRuntime),
    Disabled(String),
}

#[derive(Debug, Clone)]
struct RelayRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug)]
struct BridgeState {
    signer: PrivateKeySigner,
    connected: bool,
    chain_id: u64,
    event_seq: u64,
    events: Vec<SessionEvent>,
    reject_next: bool,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self {
            signer: PrivateKeySigner::from_bytes(&B256::with_last_byte(1))
                .expect("valid built-in deterministic key"),
            connected: false,
            chain_id: 1,
            event_seq: 0,
            events: Vec::new(),
            reject_next: false,
        }
    }
}

impl Default for WalletBridgeAdapter {
    fn default() -> Self {
        Self::with_config(SessionAdapterConfig::default())
    }
}

impl WalletBridgeAdapter {
    pub fn with_config(config: SessionAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.bridge_url {
            let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
            match reqwest::blocking::Client::builder().timeout(timeout).build() {
                Ok(client) => BridgeMode::Relay(RelayRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => BridgeMode::Disabled(format!("failed to initialize bridge client: {e}")),
            }
        } else {
            BridgeMode::Deterministic
        };

        Self {
            mode,
            state: Arc::new(Mutex::new(BridgeState::default())),
        }
    }

    /// Address of the built-in deterministic signer.
    pub fn deterministic_address(&self) -> Result<Address, PortError> {
        Ok(self.lock_state()?.signer.address())
    }

    /// Make the next request fail as a user rejection.
    pub fn debug_reject_next(&self) -> Result<(), PortError> {
        self.lock_state()?.reject_next = true;
        Ok(())
    }

    pub fn debug_inject_session_update(
        &self,
        chain_id: u64,
        accounts: Vec<Address>,
    ) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        g.chain_id = chain_id;
        push_event(&mut g, SessionEventKind::SessionUpdated { chain_id, accounts });
        Ok(())
    }

    pub fn debug_inject_disconnect(&self) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        g.connected = false;
        push_event(&mut g, SessionEventKind::Disconnected);
        Ok(())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, BridgeState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Bridge(format!("bridge lock poisoned: {e}")))
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let BridgeMode::Disabled(reason) = &self.mode {
            return Err(PortError::Bridge(reason.clone()));
        }
        Ok(())
    }

    fn take_rejection(&self) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        if g.reject_next {
            g.reject_next = false;
            return Err(PortError::Rejected);
        }
        Ok(())
    }

    fn relay_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let relay = match &self.mode {
            BridgeMode::Relay(relay) => relay,
            BridgeMode::Disabled(reason) => return Err(PortError::Bridge(reason.clone())),
            BridgeMode::Deterministic => {
                return Err(PortError::NotImplemented("bridge relay not enabled"))
            }
        };

        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = relay
            .client
            .post(&relay.base_url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Bridge(format!("bridge request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Bridge(format!("bridge json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Bridge(format!("bridge status {status}: {body}")));
        }
        if let Some(err) = body.get("error") {
            // EIP-1193 userRejectedRequest.
            if err.get("code").and_then(|c| c.as_i64()) == Some(4001) {
                return Err(PortError::Rejected);
            }
            return Err(PortError::Bridge(format!("bridge returned error: {err}")));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Bridge("bridge response missing result".to_owned()))
    }

    fn deterministic_sign_hash(&self, hash: B256) -> Result<Bytes, PortError> {
        let g = self.lock_state()?;
        if !g.connected {
            return Err(PortError::Bridge("no active session".to_owned()));
        }
        let signature = g
            .signer
            .sign_hash_sync(&hash)
            .map_err(|e| PortError::Bridge(format!("deterministic signing failed: {e}")))?;
        Ok(Bytes::from(signature.as_bytes().to_vec()))
    }

    fn relay_sign(&self, method: &str, params: Value) -> Result<Bytes, PortError> {
        let result = self.relay_call(method, params)?;
        let raw = result
            .as_str()
            .ok_or_else(|| PortError::Bridge("signature response must be hex string".to_owned()))?;
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid signature hex: {e}")))
    }
}

impl BridgePort for WalletBridgeAdapter {
    fn create_session(&self) -> Result<SessionInfo, PortError> {
        self.check_mode()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            let result = self.relay_call("wc_createSession", serde_json::json!([]))?;
            let info = parse_session_info(&result)?;
            let mut g = self.lock_state()?;
            g.connected = info.connected;
            g.chain_id = info.chain_id;
            push_event(
                &mut g,
                SessionEventKind::Connected {
                    chain_id: info.chain_id,
                    accounts: info.accounts.clone(),
                },
            );
            return Ok(info);
        }

        let mut g = self.lock_state()?;
        g.connected = true;
        let info = SessionInfo {
            connected: true,
            chain_id: g.chain_id,
            accounts: vec![g.signer.address()],
        };
        push_event(
            &mut g,
            SessionEventKind::Connected {
                chain_id: info.chain_id,
                accounts: info.accounts.clone(),
            },
        );
        Ok(info)
    }

    fn kill_session(&self) -> Result<(), PortError> {
        self.check_mode()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            self.relay_call("wc_killSession", serde_json::json!([]))?;
        }

        let mut g = self.lock_state()?;
        g.connected = false;
        push_event(&mut g, SessionEventKind::Disconnected);
        Ok(())
    }

    fn session_info(&self) -> Result<SessionInfo, PortError> {
        self.check_mode()?;
        let g = self.lock_state()?;
        let accounts = if g.connected {
            vec![g.signer.address()]
        } else {
            Vec::new()
        };
        Ok(SessionInfo {
            connected: g.connected,
            chain_id: g.chain_id,
            accounts,
        })
    }

    fn send_transaction(&self, tx: &TxRequest) -> Result<B256, PortError> {
        self.check_mode()?;
        self.take_rejection()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            let result = self.relay_call("eth_sendTransaction", serde_json::json!([tx]))?;
            let hash = result.as_str().ok_or_else(|| {
                PortError::Bridge("eth_sendTransaction must return tx hash".to_owned())
            })?;
            return hash
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")));
        }

        let g = self.lock_state()?;
        if !g.connected {
            return Err(PortError::Bridge("no active session".to_owned()));
        }
        let canonical = serde_json::to_vec(tx)
            .map_err(|e| PortError::Validation(format!("tx payload serialization failed: {e}")))?;
        Ok(keccak256(canonical))
    }

    fn sign_transaction(&self, tx: &TxRequest) -> Result<Bytes, PortError> {
        self.check_mode()?;
        self.take_rejection()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            return self.relay_sign("eth_signTransaction", serde_json::json!([tx]));
        }

        let canonical = serde_json::to_vec(tx)
            .map_err(|e| PortError::Validation(format!("tx payload serialization failed: {e}")))?;
        self.deterministic_sign_hash(keccak256(canonical))
    }

    fn sign_message(&self, address: Address, hash: B256) -> Result<Bytes, PortError> {
        self.check_mode()?;
        self.take_rejection()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            return self.relay_sign(
                "eth_sign",
                serde_json::json!([address.to_string(), hash.to_string()]),
            );
        }

        self.deterministic_sign_hash(hash)
    }

    fn sign_personal_message(&self, address: Address, message: &[u8]) -> Result<Bytes, PortError> {
        self.check_mode()?;
        self.take_rejection()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            let message_hex = format!("0x{}", alloy::hex::encode(message));
            return self.relay_sign(
                "personal_sign",
                serde_json::json!([message_hex, address.to_string()]),
            );
        }

        let g = self.lock_state()?;
        if !g.connected {
            return Err(PortError::Bridge("no active session".to_owned()));
        }
        let signature = g
            .signer
            .sign_message_sync(message)
            .map_err(|e| PortError::Bridge(format!("deterministic signing failed: {e}")))?;
        Ok(Bytes::from(signature.as_bytes().to_vec()))
    }

    fn sign_typed_data(
        &self,
        address: Address,
        typed_data_json: &str,
    ) -> Result<Bytes, PortError> {
        self.check_mode()?;
        self.take_rejection()?;

        if matches!(self.mode, BridgeMode::Relay(_)) {
            return self.relay_sign(
                "eth_signTypedData",
                serde_json::json!([address.to_string(), typed_data_json]),
            );
        }

        let typed: TypedData = serde_json::from_str(typed_data_json)
            .map_err(|e| PortError::Validation(format!("invalid typed data json: {e}")))?;
        let hash = typed
            .eip712_signing_hash()
            .map_err(|e| PortError::Validation(format!("typed data hash failed: {e}")))?;
        self.deterministic_sign_hash(hash)
    }

    fn drain_events(&self) -> Result<Vec<SessionEvent>, PortError> {
        self.check_mode()?;
        let mut g = self.lock_state()?;
        Ok(std::mem::take(&mut g.events))
    }
}

fn push_event(state: &mut BridgeState, kind: SessionEventKind) {
    state.event_seq = state.event_seq.saturating_add(1);
    let sequence = state.event_seq;
    state.events.push(SessionEvent { sequence, kind });
}

fn parse_session_info(result: &Value) -> Result<SessionInfo, PortError> {
    let chain_id = result
        .get("chainId")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| PortError::Bridge("session info missing chainId".to_owned()))?;
    let raw_accounts = result
        .get("accounts")
        .and_then(|v| v.as_array())
        .ok_or_else(|| PortError::Bridge("session info missing accounts".to_owned()))?;
    let mut accounts = Vec::with_capacity(raw_accounts.len());
    for item in raw_accounts {
        let raw = item
            .as_str()
            .ok_or_else(|| PortError::Bridge("session account must be string".to_owned()))?;
        let parsed: Address = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid session account: {e}")))?;
        accounts.push(parsed);
    }
    Ok(SessionInfo {
        connected: true,
        chain_id,
        accounts,
    })
}
