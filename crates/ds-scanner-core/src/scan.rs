//! Scan request lifecycle.
//!
//! Every scan is stamped with a generation. Starting a scan, or invalidating the
//! current one on disconnect, moves the generation forward; a completion carrying
//! an older generation is dropped.

use ds_api_types::{AnalyzeRequest, AnalyzeResponse, ReportSnapshot, TokenAddress, WalletId};

use crate::error::{Precondition, RemoteError};
use crate::report::RenderedReport;
use crate::wallet::WalletSession;

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the scan service.";
pub const MALFORMED_FAILURE_MESSAGE: &str = "Unexpected response from the scan service.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub wallet_id: WalletId,
    pub token_address: TokenAddress,
}

impl ScanRequest {
    /// Refuses unless the session is connected and the address is non-empty.
    pub fn new(session: &WalletSession, token_address: &str) -> Result<Self, Precondition> {
        let token_address = token_address.trim();
        match session {
            WalletSession::Connected(wallet_id) if !token_address.is_empty() => Ok(Self {
                wallet_id: wallet_id.clone(),
                token_address: TokenAddress(token_address.to_owned()),
            }),
            _ => Err(Precondition::ScanInputMissing),
        }
    }
}

impl From<&ScanRequest> for AnalyzeRequest {
    fn from(req: &ScanRequest) -> Self {
        Self {
            user_wallet: req.wallet_id.0.clone(),
            token_address: req.token_address.0.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Pending,
    Success(RenderedReport),
    Failure { message: String },
}

/// Proof that a completion belongs to a particular scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

/// Outcome of applying a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Success,
    Failure(String),
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ScanState {
    generation: u64,
    current: Option<ScanResult>,
    last_address: Option<String>,
}

impl ScanState {
    pub fn begin(&mut self, req: &ScanRequest) -> ScanTicket {
        self.generation += 1;
        self.current = Some(ScanResult::Pending);
        self.last_address = Some(req.token_address.0.clone());
        ScanTicket(self.generation)
    }

    pub fn is_current(&self, ticket: ScanTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn complete(
        &mut self,
        ticket: ScanTicket,
        outcome: Result<AnalyzeResponse, RemoteError>,
    ) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        match outcome {
            Ok(response) => {
                self.current = Some(ScanResult::Success(RenderedReport::from_response(response)));
                Applied::Success
            }
            Err(err) => {
                let message = failure_message(&err);
                self.current = Some(ScanResult::Failure {
                    message: message.clone(),
                });
                Applied::Failure(message)
            }
        }
    }

    /// Drop whatever is shown and orphan any in-flight scan.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn current(&self) -> Option<&ScanResult> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.current, Some(ScanResult::Pending))
    }

    pub fn snapshot(&self) -> Option<&ReportSnapshot> {
        match &self.current {
            Some(ScanResult::Success(report)) => Some(&report.snapshot),
            _ => None,
        }
    }

    pub fn last_address(&self) -> Option<&str> {
        self.last_address.as_deref()
    }
}

pub fn failure_message(err: &RemoteError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_owned();
    }
    match err {
        RemoteError::Service { status, .. } => format!("HTTP error! Status: {status}"),
        RemoteError::Malformed { .. } => MALFORMED_FAILURE_MESSAGE.to_owned(),
        RemoteError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_owned(),
    }
}
