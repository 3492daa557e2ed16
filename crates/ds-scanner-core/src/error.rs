use ds_api_types::ErrorResponse;
use thiserror::Error;

/// Failure of a call to the scan or card service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned status {status}")]
    Service { status: u16, message: Option<String> },
    #[error("malformed response (status {status}): {detail}")]
    Malformed { status: u16, detail: String },
}

impl RemoteError {
    /// Decode a non-2xx body. A JSON body without `error` is still a service
    /// error; anything that is not JSON is malformed.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => RemoteError::Service {
                status,
                message: parsed.error.filter(|m| !m.trim().is_empty()),
            },
            Err(err) => RemoteError::Malformed {
                status,
                detail: err.to_string(),
            },
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Service {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Local refusal raised before any network call.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Precondition {
    #[error("Please connect wallet and enter a token address.")]
    ScanInputMissing,
    #[error("No report on screen to generate a card from.")]
    NoRenderedReport,
    #[error("A card is already being generated.")]
    CardBusy,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet provider rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}
