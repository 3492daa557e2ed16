//! Top-level controller tying the wallet session, scan and card flows together.
//!
//! All methods take `&self`; state lives in a `RefCell` that is never borrowed
//! across an `.await`, so UI events may interleave with in-flight requests.

use std::cell::RefCell;

use ds_api_types::{AnalyzeRequest, CardRequest, ReportSnapshot};
use tracing::{debug, info, warn};

use crate::card::{CardJob, card_failure_message, download_filename};
use crate::config::ScannerConfig;
use crate::error::{Precondition, WalletError};
use crate::ports::{CardService, ScanService, Shell, WalletProvider};
use crate::scan::{Applied, ScanRequest, ScanResult, ScanState};
use crate::share::share_intent_url;
use crate::view::{View, render};
use crate::wallet::{SessionChange, WalletSession};

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect wallet.";
pub const DISCONNECT_FAILED_MESSAGE: &str = "Failed to disconnect wallet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Refused(Precondition),
    Succeeded,
    Failed(String),
    /// A newer scan or a disconnect superseded this one.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Refused(Precondition),
    Downloaded(String),
    Failed(String),
    Discarded,
}

#[derive(Debug, Default)]
struct ControllerState {
    session: WalletSession,
    scan: ScanState,
    card: CardJob,
}

pub struct Controller<W, S, C, H> {
    config: ScannerConfig,
    wallet: Option<W>,
    scans: S,
    cards: C,
    shell: H,
    state: RefCell<ControllerState>,
}

/// Puts the card job back to idle however the request ends.
struct CardJobGuard<'a>(&'a RefCell<ControllerState>);

impl Drop for CardJobGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut() {
            state.card = CardJob::Idle;
        }
    }
}

impl<W, S, C, H> Controller<W, S, C, H>
where
    W: WalletProvider,
    S: ScanService,
    C: CardService,
    H: Shell,
{
    /// `wallet` is `None` when no compatible provider is installed.
    pub fn new(config: ScannerConfig, wallet: Option<W>, scans: S, cards: C, shell: H) -> Self {
        Self {
            config,
            wallet,
            scans,
            cards,
            shell,
            state: RefCell::new(ControllerState::default()),
        }
    }

    pub fn provider_available(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn view(&self) -> View {
        let state = self.state.borrow();
        render(
            self.provider_available(),
            &state.session,
            &state.scan,
            &state.card,
        )
    }

    pub fn session(&self) -> WalletSession {
        self.state.borrow().session.clone()
    }

    pub fn scan_result(&self) -> Option<ScanResult> {
        self.state.borrow().scan.current().cloned()
    }

    pub fn snapshot(&self) -> Option<ReportSnapshot> {
        self.state.borrow().scan.snapshot().cloned()
    }

    pub fn card_job(&self) -> CardJob {
        self.state.borrow().card
    }

    fn publish(&self) {
        let view = self.view();
        self.shell.render(&view);
    }

    // ── Wallet session ──

    /// Reconnect silently if the provider already trusts this site.
    /// Publishes the initial view first.
    pub async fn attempt_silent_connect(&self) {
        self.publish();
        let Some(wallet) = &self.wallet else {
            debug!("no wallet provider; offering install link");
            return;
        };
        match wallet.connect(true).await {
            Ok(public_id) => {
                self.handle_connect(&public_id);
            }
            Err(err) => debug!("silent connect declined: {}", err),
        }
    }

    pub async fn connect(&self) -> Result<SessionChange, WalletError> {
        let Some(wallet) = &self.wallet else {
            self.shell.open_url(&self.config.install_url);
            return Ok(SessionChange::Unchanged);
        };
        match wallet.connect(false).await {
            Ok(public_id) => Ok(self.handle_connect(&public_id)),
            Err(err) => {
                warn!("wallet connect failed: {}", err);
                self.shell.alert(CONNECT_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    pub async fn disconnect(&self) -> Result<SessionChange, WalletError> {
        let Some(wallet) = &self.wallet else {
            return Ok(SessionChange::Unchanged);
        };
        match wallet.disconnect().await {
            Ok(()) => Ok(self.handle_disconnect()),
            Err(err) => {
                warn!("wallet disconnect failed: {}", err);
                self.shell.alert(DISCONNECT_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    /// Provider `connect` event, also applied after a successful [`Self::connect`].
    pub fn handle_connect(&self, public_id: &str) -> SessionChange {
        let change = {
            let mut state = self.state.borrow_mut();
            let change = state.session.connect(public_id);
            if change == SessionChange::Switched {
                state.scan.invalidate();
            }
            change
        };
        if change != SessionChange::Unchanged {
            info!(?change, "wallet connected");
            self.publish();
        }
        change
    }

    /// Provider `disconnect` event. Hides the report and orphans in-flight work.
    pub fn handle_disconnect(&self) -> SessionChange {
        let change = {
            let mut state = self.state.borrow_mut();
            let change = state.session.disconnect();
            if change == SessionChange::Disconnected {
                state.scan.invalidate();
            }
            change
        };
        if change != SessionChange::Unchanged {
            info!("wallet disconnected");
            self.publish();
        }
        change
    }

    // ── Scan ──

    pub async fn start_scan(&self, token_address: &str) -> ScanOutcome {
        let begun = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            ScanRequest::new(&state.session, token_address)
                .map(|req| (state.scan.begin(&req), AnalyzeRequest::from(&req)))
        };
        let (ticket, request) = match begun {
            Ok(begun) => begun,
            Err(refusal) => {
                self.shell.alert(&refusal.to_string());
                return ScanOutcome::Refused(refusal);
            }
        };
        debug!(?ticket, token = %request.token_address, "scan pending");
        self.publish();

        let response = self.scans.analyze(&request).await;
        let applied = self.state.borrow_mut().scan.complete(ticket, response);
        match applied {
            Applied::Stale => {
                debug!(?ticket, "discarding superseded scan response");
                ScanOutcome::Discarded
            }
            Applied::Success => {
                info!(token = %request.token_address, "scan report ready");
                self.publish();
                ScanOutcome::Succeeded
            }
            Applied::Failure(message) => {
                warn!(token = %request.token_address, "scan failed: {}", message);
                self.publish();
                self.shell.alert(&format!("Scan failed: {message}"));
                ScanOutcome::Failed(message)
            }
        }
    }

    /// Re-run the last scan, from the report's refresh control.
    pub async fn refresh_scan(&self) -> ScanOutcome {
        let address = self
            .state
            .borrow()
            .scan
            .last_address()
            .map(str::to_owned)
            .unwrap_or_default();
        self.start_scan(&address).await
    }

    // ── Card ──

    pub async fn generate_card(&self) -> CardOutcome {
        let started = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            if state.card.is_busy() {
                Err(Precondition::CardBusy)
            } else {
                match state.scan.snapshot() {
                    None => Err(Precondition::NoRenderedReport),
                    Some(snapshot) => {
                        let scan_generation = state.scan.generation();
                        state.card = CardJob::InFlight { scan_generation };
                        Ok((CardRequest::from(snapshot), scan_generation))
                    }
                }
            }
        };
        let (request, scan_generation) = match started {
            Ok(started) => started,
            Err(Precondition::CardBusy) => {
                debug!("card already generating; ignoring");
                return CardOutcome::Refused(Precondition::CardBusy);
            }
            Err(refusal) => {
                self.shell.alert(&refusal.to_string());
                return CardOutcome::Refused(refusal);
            }
        };

        let result = {
            let _job = CardJobGuard(&self.state);
            self.publish();
            self.cards.generate_card(&request).await
        };
        self.publish();

        if self.state.borrow().scan.generation() != scan_generation {
            debug!("report changed while the card was generating; discarding");
            return CardOutcome::Discarded;
        }
        match result {
            Ok(image) => {
                let filename =
                    download_filename(image.content_disposition.as_deref(), &request.symbol);
                info!(%filename, bytes = image.bytes.len(), "card generated");
                self.shell.download(&filename, &image);
                CardOutcome::Downloaded(filename)
            }
            Err(err) => {
                let message = card_failure_message(&err);
                warn!("card generation failed: {}", err);
                self.shell.alert(&format!("Error: {message}"));
                CardOutcome::Failed(message)
            }
        }
    }

    // ── Share ──

    /// Open the share intent for the rendered report. No report, no-op.
    pub fn share(&self) -> Option<String> {
        let snapshot = self.snapshot()?;
        let url = share_intent_url(&self.config.share_intent_base, &snapshot);
        self.shell.open_url(&url);
        Some(url)
    }
}
