use alloy::primitives::Address;

use crate::domain::{
    AccountAsset, Classification, SessionEventKind, SessionState, SignResult, TxRequest,
};
use crate::hashing::{
    gwei_to_wei, message_hash, sanitize_hex, sanitize_hex_u64, typed_data_hash, verify_signature,
};
use crate::ports::{BridgePort, ChainReadPort, ClockPort, PortError, RegistryPort};
use crate::registry::{classify, lookup_key, normalize_input, render_output};
use crate::state_machine::{apply_event, LookupState};

/// Fixed gas limit for the no-op self transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Message used by the legacy `eth_sign` test.
pub const LEGACY_SIGN_MESSAGE: &str = "SafeConnect eth_sign test message";

/// Page origins that get the trusted personal-sign message. This selects the
/// message text only; signing proceeds for every origin.
pub const TRUSTED_ORIGINS: [&str; 2] = ["http://localhost:3000/", "www.opensea.io/"];

/// Single state-owning driver for the session, the five signing operations
/// and the registry lookup. Ports are public so shells and tests can reach
/// adapter-specific hooks, mirroring how the session mirror is otherwise
/// only mutated through reducer transitions.
pub struct Orchestrator<B, N, R, C>
where
    B: BridgePort,
    N: ChainReadPort,
    R: RegistryPort,
    C: ClockPort,
{
    pub bridge: B,
    pub chain: N,
    pub registry: R,
    pub clock: C,
    session: SessionState,
    lookup: LookupState,
    session_epoch: u64,
    page_origin: String,
}

impl<B, N, R, C> Orchestrator<B, N, R, C>
where
    B: BridgePort,
    N: ChainReadPort,
    R: RegistryPort,
    C: ClockPort,
{
    pub fn new(bridge: B, chain: N, registry: R, clock: C, page_origin: impl Into<String>) -> Self {
        Self {
            bridge,
            chain,
            registry,
            clock,
            session: SessionState::default(),
            lookup: LookupState::Idle,
            session_epoch: 0,
            page_origin: page_origin.into(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn lookup_state(&self) -> LookupState {
        self.lookup
    }

    /// Current session epoch. Bumped on every reset; operation outcomes that
    /// started under an older epoch must be discarded by the caller.
    pub fn session_epoch(&self) -> u64 {
        self.session_epoch
    }

    /// Open a session through the bridge, reusing a live one if present.
    /// Pairing (QR code / deep link) is the bridge's concern.
    pub fn connect(&mut self) -> Result<(), PortError> {
        let info = self.bridge.session_info()?;
        let info = if info.connected {
            info
        } else {
            self.bridge.create_session()?
        };
        self.session.connected = true;
        self.session.chain_id = info.chain_id;
        self.session.accounts = info.accounts;
        Ok(())
    }

    /// Request remote teardown and reset local state. The reset happens even
    /// if the teardown request itself fails.
    pub fn kill_session(&mut self) -> Result<(), PortError> {
        let teardown = self.bridge.kill_session();
        self.reset();
        teardown
    }

    /// Drain bridge events and fold them into the session mirror.
    ///
    /// A bridge-level error is re-raised without touching local state; only
    /// an explicit `Disconnected` event resets. These are deliberately two
    /// distinct paths.
    pub fn pump_events(&mut self) -> Result<(), PortError> {
        for event in self.bridge.drain_events()? {
            let disconnected = event.kind == SessionEventKind::Disconnected;
            self.session = apply_event(&self.session, &event.kind);
            if disconnected {
                self.lookup = LookupState::Idle;
                self.session_epoch = self.session_epoch.saturating_add(1);
            }
        }
        Ok(())
    }

    /// Fetch the account's asset listing, guarded by the `fetching` flag.
    pub fn fetch_assets(&mut self) -> Result<Vec<AccountAsset>, PortError> {
        let address = self.current_address()?;
        let chain_id = self.session.chain_id;
        self.session.fetching = true;
        let outcome = self.chain.account_assets(address, chain_id);
        self.session.fetching = false;
        outcome
    }

    /// Send a no-op self transfer through the wallet.
    pub fn send_transaction(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let tx = self.build_self_transfer(address)?;
        let tx_hash = self.pending(|this| this.bridge.send_transaction(&tx))?;
        Ok(SignResult::SendTransaction {
            tx_hash,
            from: address,
            to: address,
            value: "0 ETH".to_owned(),
        })
    }

    /// Have the wallet sign (but not broadcast) the no-op self transfer.
    pub fn sign_transaction(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let tx = self.build_self_transfer(address)?;
        let raw = self.pending(|this| this.bridge.sign_transaction(&tx))?;
        Ok(SignResult::SignTransaction {
            from: address,
            to: address,
            value: "0 ETH".to_owned(),
            raw,
        })
    }

    /// Legacy `eth_sign`: hash a fixed message locally and submit the digest.
    pub fn legacy_sign_message(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let hash = message_hash(LEGACY_SIGN_MESSAGE);
        let signature = self.pending(|this| this.bridge.sign_message(address, hash))?;
        let valid = verify_signature(address, &signature, hash);
        Ok(SignResult::LegacySign {
            address,
            valid,
            signature,
        })
    }

    /// Standard `eth_sign`: same shape as legacy, over a timestamped message.
    pub fn standard_sign_message(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let now = self.clock.now_ms()?;
        let message = format!("My email is john@doe.com - {now}");
        let hash = message_hash(&message);
        let signature = self.pending(|this| this.bridge.sign_message(address, hash))?;
        let valid = verify_signature(address, &signature, hash);
        Ok(SignResult::StandardSign {
            address,
            valid,
            signature,
        })
    }

    /// `personal_sign` with the origin-dependent trust indicator message.
    pub fn personal_sign_message(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let message = personal_sign_text(&self.page_origin);
        let hash = message_hash(&message);
        let signature =
            self.pending(|this| this.bridge.sign_personal_message(address, message.as_bytes()))?;
        let valid = verify_signature(address, &signature, hash);
        Ok(SignResult::PersonalSign {
            address,
            valid,
            signature,
        })
    }

    /// Sign the fixed EIP-712 example document.
    pub fn sign_typed_data(&mut self) -> Result<SignResult, PortError> {
        let address = self.current_address()?;
        let json = serde_json::to_string(&typed_data_example())
            .map_err(|e| PortError::Validation(format!("typed data serialization: {e}")))?;
        let hash = typed_data_hash(&json)?;
        let signature = self.pending(|this| this.bridge.sign_typed_data(address, &json))?;
        let valid = verify_signature(address, &signature, hash);
        Ok(SignResult::TypedData {
            address,
            valid,
            signature,
        })
    }

    /// Classify a user-submitted website string against the registry.
    ///
    /// A transport failure surfaces as an error with the lookup back at
    /// `Idle`; a record that fails the exact-match check is the `Error`
    /// classification, not an error.
    pub fn classify_input(&mut self, input: &str) -> Result<(Classification, String), PortError> {
        let query = normalize_input(input);
        self.lookup = LookupState::Querying;
        let record = match self.registry.get_uri(lookup_key(&query)) {
            Ok(record) => record,
            Err(e) => {
                self.lookup = LookupState::Idle;
                return Err(e);
            }
        };
        let classification = classify(&query, &record);
        self.lookup = LookupState::Classified(classification);
        Ok((classification, render_output(input, classification)))
    }

    fn current_address(&self) -> Result<Address, PortError> {
        self.session
            .address()
            .ok_or_else(|| PortError::Validation("no connected account".to_owned()))
    }

    /// Run a bridge request with the pending flag raised; the flag is cleared
    /// on both success and failure before the outcome propagates.
    fn pending<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, PortError>,
    ) -> Result<T, PortError> {
        self.session.pending_request = true;
        let outcome = op(self);
        self.session.pending_request = false;
        outcome
    }

    fn build_self_transfer(&self, address: Address) -> Result<TxRequest, PortError> {
        let nonce = self.chain.account_nonce(address, self.session.chain_id)?;
        let gas_prices = self.chain.gas_prices()?;
        Ok(TxRequest {
            from: address,
            to: address,
            nonce: sanitize_hex_u64(nonce),
            gas_price: sanitize_hex(gwei_to_wei(gas_prices.slow.price)),
            gas_limit: sanitize_hex_u64(TRANSFER_GAS_LIMIT),
            value: sanitize_hex_u64(0),
            data: "0x".to_owned(),
        })
    }

    fn reset(&mut self) {
        self.session = SessionState::default();
        self.lookup = LookupState::Idle;
        self.session_epoch = self.session_epoch.saturating_add(1);
    }
}

/// Trust indicator text for `personal_sign`. The allow-list picks the
/// message, nothing else; callers sign either way.
pub fn personal_sign_text(page_origin: &str) -> String {
    if TRUSTED_ORIGINS.contains(&page_origin) {
        format!("TRUSTED WEBSITE {page_origin} would like to connect with you.")
    } else {
        "DANGER!!! DANGER!!! DANGER!!! This is not a verified website.".to_owned()
    }
}

/// The fixed EIP-712 example document used by the typed-data test.
pub fn typed_data_example() -> serde_json::Value {
    serde_json::json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" }
            ],
            "Person": [
                { "name": "name", "type": "string" },
                { "name": "wallet", "type": "address" }
            ],
            "Mail": [
                { "name": "from", "type": "Person" },
                { "name": "to", "type": "Person" },
                { "name": "contents", "type": "string" }
            ]
        },
        "primaryType": "Mail",
        "domain": {
            "name": "Ether Mail",
            "version": "1",
            "chainId": 1,
            "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
        },
        "message": {
            "from": {
                "name": "Cow",
                "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"
            },
            "to": {
                "name": "Bob",
                "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
            },
            "contents": "Hello, Bob!"
        }
    })
}
