//! Main application state and update loop

use std::sync::{Arc, Mutex};

use eframe::egui;

use alloy::primitives::Address;

use safeconnect_session_core::{AccountAsset, SessionState, SignMethod, SignResult};

use crate::session_bridge::SessionBridge;
use crate::state::{
    format_balance, AssetsOutcome, ConnectOutcome, LookupOutcome, OpOutcome, RegistryCheckState,
};
use crate::ui;

/// Signing operations in button order.
const OPERATIONS: [SignMethod; 6] = [
    SignMethod::EthSendTransaction,
    SignMethod::EthSignTransaction,
    SignMethod::EthSignLegacy,
    SignMethod::EthSignStandard,
    SignMethod::PersonalSign,
    SignMethod::EthSignTypedData,
];

/// The main application state
pub struct App {
    bridge: SessionBridge,
    /// Per-frame snapshot of the orchestrator's session mirror
    session: SessionState,
    /// Session epoch the shell last observed; a change invalidates results
    seen_epoch: u64,
    /// Account observed last frame; a change triggers an asset refresh
    last_address: Option<Address>,
    assets: Vec<AccountAsset>,
    registry: RegistryCheckState,
    last_result: Option<SignResult>,
    last_error: Option<String>,
    connecting: bool,
    op_in_flight: Option<SignMethod>,
    /// Async outcome receivers, filled by worker threads
    connect_outcome: Arc<Mutex<Option<ConnectOutcome>>>,
    op_outcome: Arc<Mutex<Option<OpOutcome>>>,
    assets_outcome: Arc<Mutex<Option<AssetsOutcome>>>,
    lookup_outcome: Arc<Mutex<Option<LookupOutcome>>>,
}

fn slot<T>() -> Arc<Mutex<Option<T>>> {
    Arc::new(Mutex::new(None))
}

fn take<T>(slot: &Arc<Mutex<Option<T>>>) -> Option<T> {
    slot.lock().ok().and_then(|mut g| g.take())
}

impl App {
    /// Create a new App instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            bridge: SessionBridge::default(),
            session: SessionState::default(),
            seen_epoch: 0,
            last_address: None,
            assets: Vec::new(),
            registry: RegistryCheckState::default(),
            last_result: None,
            last_error: None,
            connecting: false,
            op_in_flight: None,
            connect_outcome: slot(),
            op_outcome: slot(),
            assets_outcome: slot(),
            lookup_outcome: slot(),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_connect_outcome();
        self.check_op_outcome();
        self.check_assets_outcome();
        self.check_lookup_outcome();
        self.refresh_session(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("🔗 SafeConnect")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0, 212, 170)),
                );
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                if let Some(error) = self.last_error.clone() {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("⚠ {error}"))
                                .color(egui::Color32::from_rgb(220, 50, 50)),
                        );
                        if ui.small_button("✖").clicked() {
                            self.last_error = None;
                        }
                    });
                    ui.add_space(5.0);
                }

                if self.session.connected {
                    self.render_session(ui, ctx);
                } else {
                    self.render_landing(ui, ctx);
                }
                ui.add_space(20.0);
            });
        });

        self.render_pending_modal(ctx);
        self.render_result_modal(ctx);
    }
}

impl App {
    fn render_landing(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Connect a wallet");
        ui.label("Open a session to run the signing test suite.");
        ui.add_space(15.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.connecting, egui::Button::new("Connect Wallet"))
                .clicked()
            {
                self.trigger_connect(ctx);
            }
            if self.connecting {
                ui.spinner();
            }
        });

        self.render_registry_check(ui, ctx);
    }

    fn render_session(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Session");
        ui.add_space(5.0);

        let address = self
            .session
            .address()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "(none)".to_owned());
        ui::mono_row(ui, "Account", &address);
        ui::mono_row(ui, "Chain", &self.session.chain_id.to_string());

        ui.add_space(5.0);
        if ui.button("Disconnect").clicked() {
            self.trigger_disconnect(ctx);
        }

        ui::section_header(ui, "Test Operations");
        let idle = self.op_in_flight.is_none() && !self.session.pending_request;
        ui.horizontal_wrapped(|ui| {
            for method in OPERATIONS {
                if ui
                    .add_enabled(idle, egui::Button::new(method.display_name()))
                    .clicked()
                {
                    self.trigger_operation(ctx, method);
                }
            }
        });

        ui::section_header(ui, "Balances");
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.session.fetching, egui::Button::new("Fetch Balances"))
                .clicked()
            {
                self.trigger_fetch_assets(ctx);
            }
            if self.session.fetching {
                ui.spinner();
            }
        });
        for asset in &self.assets {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&asset.symbol).strong());
                ui.label(
                    egui::RichText::new(format_balance(&asset.balance, asset.decimals))
                        .monospace(),
                );
            });
        }

        self.render_registry_check(ui, ctx);
    }

    fn render_registry_check(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::section_header(ui, "Website Registry Check");
        ui.label("Classify a website against the on-chain registry.");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui::text_input(ui, &mut self.registry.input, "www.example.com", 300.0);
            let ready = !self.registry.is_loading && !self.registry.input.trim().is_empty();
            if ui.add_enabled(ready, egui::Button::new("Check")).clicked() {
                self.trigger_lookup(ctx);
            }
            if self.registry.is_loading {
                ui.spinner();
            }
        });

        if let Some((classification, output)) = &self.registry.output {
            ui.add_space(5.0);
            ui.label(
                egui::RichText::new(output)
                    .strong()
                    .color(ui::classification_color(*classification)),
            );
        }
        if let Some(error) = &self.registry.error {
            ui.add_space(5.0);
            ui.label(
                egui::RichText::new(error).color(egui::Color32::from_rgb(220, 50, 50)),
            );
        }
    }

    fn render_pending_modal(&mut self, ctx: &egui::Context) {
        if self.op_in_flight.is_none() && !self.session.pending_request {
            return;
        }
        egui::Window::new("Pending Call Request")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(5.0);
                ui.label("Approve or reject the request using your wallet.");
                ui.add_space(5.0);
                ui.spinner();
                ui.add_space(5.0);
            });
    }

    fn render_result_modal(&mut self, ctx: &egui::Context) {
        let Some(result) = self.last_result.clone() else {
            return;
        };
        egui::Window::new("Call Request Approved")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(5.0);
                for (label, value) in result.display_rows() {
                    ui::mono_row(ui, label, &value);
                }
                ui.add_space(10.0);
                if ui.button("Close").clicked() {
                    self.last_result = None;
                }
            });
    }

    /// Drain bridge events and refresh the session snapshot. An epoch change
    /// means the session was reset, so everything derived from it is stale;
    /// a new or changed account triggers an asset refresh.
    fn refresh_session(&mut self, ctx: &egui::Context) {
        if let Err(e) = self.bridge.pump_events() {
            tracing::warn!("event pump failed: {e}");
        }
        match self.bridge.session() {
            Ok(session) => self.session = session,
            Err(e) => tracing::warn!("session snapshot failed: {e}"),
        }
        if let Ok(epoch) = self.bridge.session_epoch() {
            if epoch != self.seen_epoch {
                self.seen_epoch = epoch;
                self.assets.clear();
                self.last_result = None;
                self.registry.clear_results();
            }
        }
        let address = self.session.connected.then(|| self.session.address()).flatten();
        if address != self.last_address {
            self.last_address = address;
            if address.is_some() {
                self.assets.clear();
                self.trigger_fetch_assets(ctx);
            }
        }
    }

    fn check_connect_outcome(&mut self) {
        if let Some(outcome) = take(&self.connect_outcome) {
            self.connecting = false;
            if let ConnectOutcome::Error(e) = outcome {
                self.last_error = Some(e);
            }
        }
    }

    fn check_op_outcome(&mut self) {
        let Some(outcome) = take(&self.op_outcome) else {
            return;
        };
        self.op_in_flight = None;
        let current = self.bridge.session_epoch().unwrap_or(outcome.epoch);
        if outcome.epoch != current {
            tracing::debug!("dropping signing outcome from a torn-down session");
            return;
        }
        match outcome.result {
            Ok(result) => self.last_result = Some(result),
            Err(e) => self.last_error = Some(e),
        }
    }

    fn check_assets_outcome(&mut self) {
        let Some(outcome) = take(&self.assets_outcome) else {
            return;
        };
        let current = self.bridge.session_epoch().unwrap_or(outcome.epoch);
        if outcome.epoch != current {
            return;
        }
        match outcome.result {
            Ok(assets) => self.assets = assets,
            // Degrades to an empty listing; not worth an error banner.
            Err(e) => tracing::warn!("asset fetch failed: {e}"),
        }
    }

    fn check_lookup_outcome(&mut self) {
        if let Some(outcome) = take(&self.lookup_outcome) {
            self.registry.is_loading = false;
            match outcome.result {
                Ok(output) => {
                    self.registry.output = Some(output);
                    self.registry.input.clear();
                }
                Err(e) => self.registry.error = Some(e),
            }
        }
    }

    fn trigger_connect(&mut self, ctx: &egui::Context) {
        self.connecting = true;
        self.last_error = None;
        let bridge = self.bridge.clone();
        let slot = Arc::clone(&self.connect_outcome);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match bridge.connect() {
                Ok(()) => ConnectOutcome::Success,
                Err(e) => ConnectOutcome::Error(e.to_string()),
            };
            if let Ok(mut g) = slot.lock() {
                *g = Some(outcome);
            }
            ctx.request_repaint();
        });
    }

    fn trigger_disconnect(&mut self, ctx: &egui::Context) {
        let bridge = self.bridge.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            if let Err(e) = bridge.kill_session() {
                tracing::warn!("session teardown request failed: {e}");
            }
            ctx.request_repaint();
        });
    }

    fn trigger_operation(&mut self, ctx: &egui::Context, method: SignMethod) {
        self.op_in_flight = Some(method);
        self.last_error = None;
        let bridge = self.bridge.clone();
        let slot = Arc::clone(&self.op_outcome);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let epoch = bridge.session_epoch().unwrap_or(0);
            let result = bridge.run_operation(method).map_err(|e| e.to_string());
            if let Ok(mut g) = slot.lock() {
                *g = Some(OpOutcome { epoch, result });
            }
            ctx.request_repaint();
        });
    }

    fn trigger_fetch_assets(&mut self, ctx: &egui::Context) {
        let bridge = self.bridge.clone();
        let slot = Arc::clone(&self.assets_outcome);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let epoch = bridge.session_epoch().unwrap_or(0);
            let result = bridge.fetch_assets().map_err(|e| e.to_string());
            if let Ok(mut g) = slot.lock() {
                *g = Some(AssetsOutcome { epoch, result });
            }
            ctx.request_repaint();
        });
    }

    fn trigger_lookup(&mut self, ctx: &egui::Context) {
        self.registry.clear_results();
        self.registry.is_loading = true;
        let input = self.registry.input.trim().to_owned();
        let bridge = self.bridge.clone();
        let slot = Arc::clone(&self.lookup_outcome);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = bridge.classify_input(&input).map_err(|e| e.to_string());
            if let Ok(mut g) = slot.lock() {
                *g = Some(LookupOutcome { result });
            }
            ctx.request_repaint();
        });
    }
}
