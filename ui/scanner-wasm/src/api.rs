//! HTTP API client.
//!
//! Same-origin `fetch` calls to the scan and card services via `gloo-net`.

use async_trait::async_trait;
use ds_api_types::{
    ANALYZE_PATH, AnalyzeRequest, AnalyzeResponse, CardRequest, GENERATE_CARD_PATH,
};
use ds_scanner_core::{CardImage, CardService, RemoteError, ScanService, ScannerConfig};
use gloo_net::http::{Request, Response};
use serde::Serialize;
use tracing::debug;

#[derive(Clone)]
pub struct FetchClient {
    config: ScannerConfig,
}

impl FetchClient {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, RemoteError> {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        Request::post(&url)
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)
    }
}

fn transport(err: gloo_net::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

async fn error_from(resp: Response) -> RemoteError {
    let status = resp.status();
    match resp.text().await {
        Ok(text) => RemoteError::from_error_body(status, &text),
        Err(err) => transport(err),
    }
}

#[async_trait(?Send)]
impl ScanService for FetchClient {
    async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalyzeResponse, RemoteError> {
        let resp = self.post(ANALYZE_PATH, req).await?;
        if !resp.ok() {
            return Err(error_from(resp).await);
        }
        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;
        serde_json::from_str(&text).map_err(|err| RemoteError::Malformed {
            status,
            detail: err.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl CardService for FetchClient {
    async fn generate_card(&self, req: &CardRequest) -> Result<CardImage, RemoteError> {
        let resp = self.post(GENERATE_CARD_PATH, req).await?;
        if !resp.ok() {
            return Err(error_from(resp).await);
        }
        let headers = resp.headers();
        let content_type = headers.get("content-type");
        let content_disposition = headers.get("content-disposition");
        let bytes = resp.binary().await.map_err(transport)?;
        Ok(CardImage {
            bytes,
            content_type,
            content_disposition,
        })
    }
}
