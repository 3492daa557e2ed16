use std::cell::RefCell;
use std::rc::Rc;

use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use ds_api_types::{AnalyzeRequest, CardRequest};
use ds_scan_http::HttpScanClient;
use ds_scan_http::console::FixedWallet;
use ds_scanner_core::{
    CardImage, CardOutcome, CardService, Controller, RemoteError, ReportView, ScanOutcome,
    ScanService, ScannerConfig, Shell, View,
};
use serde_json::json;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

async fn analyze(Json(req): Json<AnalyzeRequest>) -> Response {
    match req.token_address.as_str() {
        "RateLimited" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "rate limited" })),
        )
            .into_response(),
        "Broken" => (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response(),
        "Dollar" => Json(json!({
            "report": "<div class=\"report-container\"><h2>Token Report: Bar ($BAR)</h2></div>",
            "snapshot": { "name": "Bar", "symbol": "$BAR", "fdv": "$9.00", "degen_score": 5 }
        }))
        .into_response(),
        _ => Json(json!({
            "report": format!(
                "<div class=\"report-container\">...<h2>Token Report: Foo (FOO)</h2><p>{}</p></div>",
                req.user_wallet
            )
        }))
        .into_response(),
    }
}

async fn generate_card(Json(req): Json<CardRequest>) -> Response {
    match req.symbol.as_str() {
        "FOO" => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"FOO_degen_card.png\"",
                ),
            ],
            PNG.to_vec(),
        )
            .into_response(),
        "$BAR" if req.degen_score == 5 => {
            ([(header::CONTENT_TYPE, "image/png")], PNG.to_vec()).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "renderer crashed").into_response(),
    }
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/analyze", post(analyze))
        .route("/generate_ai_card", post(generate_card));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Clone, Default)]
struct RecordingShell {
    views: Rc<RefCell<Vec<View>>>,
    alerts: Rc<RefCell<Vec<String>>>,
    downloads: Rc<RefCell<Vec<(String, usize)>>>,
}

impl Shell for RecordingShell {
    fn render(&self, view: &View) {
        self.views.borrow_mut().push(view.clone());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn download(&self, filename: &str, image: &CardImage) {
        self.downloads
            .borrow_mut()
            .push((filename.to_owned(), image.bytes.len()));
    }

    fn open_url(&self, _url: &str) {}
}

fn controller(
    endpoint: String,
    shell: RecordingShell,
) -> Controller<FixedWallet, HttpScanClient, HttpScanClient, RecordingShell> {
    let client = HttpScanClient::new(Some(endpoint)).unwrap();
    Controller::new(
        ScannerConfig::default(),
        Some(FixedWallet::new("Abcd...wxyz")),
        client.clone(),
        client,
        shell,
    )
}

#[tokio::test]
async fn analyze_posts_wallet_and_token() -> anyhow::Result<()> {
    let endpoint = spawn_server().await;
    let client = HttpScanClient::new(Some(format!("{endpoint}/")))?;
    assert_eq!(client.endpoint(), endpoint);

    let response = client
        .analyze(&AnalyzeRequest {
            user_wallet: "Abcd...wxyz".into(),
            token_address: "TokenXYZ".into(),
        })
        .await?;
    let report = response.report.unwrap_or_default();
    assert!(report.contains("<h2>Token Report: Foo (FOO)</h2>"));
    assert!(report.contains("Abcd...wxyz"));
    Ok(())
}

#[tokio::test]
async fn service_error_keeps_server_message() {
    let client = HttpScanClient::new(Some(spawn_server().await)).unwrap();
    let err = client
        .analyze(&AnalyzeRequest {
            user_wallet: "Abcd...wxyz".into(),
            token_address: "RateLimited".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RemoteError::Service {
            status: 500,
            message: Some("rate limited".into())
        }
    );
}

#[tokio::test]
async fn non_json_error_is_malformed() {
    let client = HttpScanClient::new(Some(spawn_server().await)).unwrap();
    let err = client
        .analyze(&AnalyzeRequest {
            user_wallet: "Abcd...wxyz".into(),
            token_address: "Broken".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Malformed { status: 502, .. }));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpScanClient::new(Some(format!("http://{addr}"))).unwrap();
    let err = client
        .generate_card(&CardRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            fdv: "N/A".into(),
            degen_score: 0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}

#[tokio::test]
async fn card_exposes_disposition_header() {
    let client = HttpScanClient::new(Some(spawn_server().await)).unwrap();
    let image = client
        .generate_card(&CardRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            fdv: "N/A".into(),
            degen_score: 0,
        })
        .await
        .unwrap();
    assert_eq!(image.bytes, PNG);
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(
        image.content_disposition.as_deref(),
        Some("attachment; filename=\"FOO_degen_card.png\"")
    );
}

#[tokio::test]
async fn scan_and_card_end_to_end() {
    let shell = RecordingShell::default();
    let controller = controller(spawn_server().await, shell.clone());

    controller.connect().await.unwrap();
    assert_eq!(controller.start_scan("TokenXYZ").await, ScanOutcome::Succeeded);
    let view = controller.view();
    assert!(matches!(view.report, ReportView::Markup(_)));
    assert!(view.card_button.visible && view.share_visible);

    assert_eq!(
        controller.generate_card().await,
        CardOutcome::Downloaded("FOO_degen_card.png".into())
    );
    assert_eq!(
        *shell.downloads.borrow(),
        vec![("FOO_degen_card.png".to_owned(), PNG.len())]
    );
}

#[tokio::test]
async fn structured_snapshot_drives_card_and_default_filename() {
    let shell = RecordingShell::default();
    let controller = controller(spawn_server().await, shell.clone());

    controller.connect().await.unwrap();
    controller.start_scan("Dollar").await;
    assert_eq!(controller.snapshot().map(|s| s.degen_score), Some(5));
    assert_eq!(
        controller.generate_card().await,
        CardOutcome::Downloaded("BAR_degen_card.png".into())
    );
}

#[tokio::test]
async fn scan_failure_end_to_end() {
    let shell = RecordingShell::default();
    let controller = controller(spawn_server().await, shell.clone());

    controller.connect().await.unwrap();
    assert_eq!(
        controller.start_scan("RateLimited").await,
        ScanOutcome::Failed("rate limited".into())
    );
    let view = controller.view();
    assert_eq!(view.report, ReportView::Failure("rate limited".into()));
    assert!(!view.card_button.visible && !view.share_visible);
    assert_eq!(
        shell.alerts.borrow().last().map(String::as_str),
        Some("Scan failed: rate limited")
    );
}
