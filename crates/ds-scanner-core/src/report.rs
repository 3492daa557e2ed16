//! Builds the [`ReportSnapshot`] for a successful scan.
//!
//! Services that send a structured `snapshot` are used as-is. Older services only
//! return markup, so the title and the market cap entry are read out of it once,
//! when the scan completes. The degen score is never guessed from markup.

use std::sync::LazyLock;

use ds_api_types::{AnalyzeResponse, NOT_AVAILABLE, ReportSnapshot};
use regex::Regex;
use tracing::debug;

pub const MARKET_CAP_LABEL: &str = "Market Cap (FDV)";
pub const EMPTY_REPORT_MARKUP: &str =
    r#"<div class="report-container card"><p>No report data.</p></div>"#;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h2[^>]*>(.*?)</h2>").expect("title pattern is valid")
});
static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("symbol pattern is valid"));
static LABELED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<strong[^>]*>(.*?)</strong>\s*<span[^>]*class=['"][^'"]*\bvalue\b[^'"]*['"][^>]*>(.*?)</span>"#)
        .expect("labeled value pattern is valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Markup to display and the snapshot derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub markup: String,
    pub snapshot: ReportSnapshot,
}

impl RenderedReport {
    pub fn from_response(response: AnalyzeResponse) -> Self {
        let markup = response
            .report
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPORT_MARKUP.to_owned());
        let snapshot = response.snapshot.unwrap_or_else(|| {
            let snapshot = snapshot_from_markup(&markup);
            debug!(
                name = %snapshot.name,
                symbol = %snapshot.symbol,
                "no structured snapshot; degen score defaults to 0"
            );
            snapshot
        });
        Self { markup, snapshot }
    }
}

pub fn snapshot_from_markup(markup: &str) -> ReportSnapshot {
    let mut snapshot = ReportSnapshot::default();

    if let Some(title) = TITLE.captures(markup).map(|c| text_of(&c[1])) {
        let title = title.replace("Token Report: ", "");
        let name = title.split(" (").next().unwrap_or_default().trim();
        if !name.is_empty() {
            snapshot.name = name.to_owned();
        }
        if let Some(symbol) = SYMBOL.captures(&title) {
            snapshot.symbol = symbol[1].to_owned();
        }
    }

    if let Some(value) = labeled_value(markup, MARKET_CAP_LABEL) {
        snapshot.market_cap_display = value;
    }

    snapshot
}

fn labeled_value(markup: &str, label: &str) -> Option<String> {
    LABELED_VALUE
        .captures_iter(markup)
        .find(|c| text_of(&c[1]).contains(label))
        .map(|c| text_of(&c[2]))
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

fn text_of(fragment: &str) -> String {
    TAG.replace_all(fragment, "").trim().to_owned()
}
