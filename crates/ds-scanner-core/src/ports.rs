//! Boundaries to the collaborators the controller does not own.
//!
//! Futures are `?Send`: everything runs on the browser's single event loop.

use async_trait::async_trait;
use ds_api_types::{AnalyzeRequest, AnalyzeResponse, CardRequest};

use crate::error::{RemoteError, StorageError, WalletError};
use crate::view::View;

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Resolve to the connected public identifier.
    async fn connect(&self, only_if_trusted: bool) -> Result<String, WalletError>;
    async fn disconnect(&self) -> Result<(), WalletError>;
}

#[async_trait(?Send)]
pub trait ScanService {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalyzeResponse, RemoteError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

#[async_trait(?Send)]
pub trait CardService {
    async fn generate_card(&self, req: &CardRequest) -> Result<CardImage, RemoteError>;
}

/// Presentation side effects.
pub trait Shell {
    fn render(&self, view: &View);
    fn alert(&self, message: &str);
    fn download(&self, filename: &str, image: &CardImage);
    fn open_url(&self, url: &str);
}

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
