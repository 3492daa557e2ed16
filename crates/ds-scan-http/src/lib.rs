use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ds_api_types::{
    ANALYZE_PATH, AnalyzeRequest, AnalyzeResponse, CardRequest, GENERATE_CARD_PATH,
};
use ds_scanner_core::{CardImage, CardService, RemoteError, ScanService};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use tracing::{debug, warn};

pub mod console;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";
pub const ENDPOINT_ENV: &str = "DEGEN_SCANNER_API";

/// HTTP client for the scan and card services.
///
/// Reads `DEGEN_SCANNER_API` from environment at construction time
/// (default: `http://localhost:5000`).
#[derive(Clone)]
pub struct HttpScanClient {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpScanClient {
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let endpoint = endpoint
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("build scanner http client")?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!(%url, "POST");
        self.http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))
    }
}

async fn error_from(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(text) => RemoteError::from_error_body(status, &text),
        Err(err) => RemoteError::Transport(err.to_string()),
    }
}

#[async_trait(?Send)]
impl ScanService for HttpScanClient {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalyzeResponse, RemoteError> {
        let response = self.post(ANALYZE_PATH, req).await?;
        let status = response.status();
        if !status.is_success() {
            let err = error_from(response).await;
            warn!(%status, "analyze rejected: {}", err);
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        serde_json::from_str(&text).map_err(|err| RemoteError::Malformed {
            status: status.as_u16(),
            detail: err.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl CardService for HttpScanClient {
    async fn generate_card(&self, req: &CardRequest) -> Result<CardImage, RemoteError> {
        let response = self.post(GENERATE_CARD_PATH, req).await?;
        let status = response.status();
        if !status.is_success() {
            let err = error_from(response).await;
            warn!(%status, "card generation rejected: {}", err);
            return Err(err);
        }

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);
        let bytes = response
            .bytes()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        Ok(CardImage {
            bytes: bytes.to_vec(),
            content_type,
            content_disposition,
        })
    }
}
