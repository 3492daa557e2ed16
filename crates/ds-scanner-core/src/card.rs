//! Card generation job and download naming.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RemoteError;

pub const CARD_IDLE_LABEL: &str = "Download Degen Card";
pub const CARD_BUSY_LABEL: &str = "Generating Card...";
pub const CARD_FAILURE_MESSAGE: &str = "Server failed to generate the card.";

static FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="(.+)""#).expect("filename pattern is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardJob {
    #[default]
    Idle,
    /// Carries the scan generation the card was requested for.
    InFlight { scan_generation: u64 },
}

impl CardJob {
    pub fn is_busy(&self) -> bool {
        matches!(self, CardJob::InFlight { .. })
    }

    pub fn label(&self) -> &'static str {
        if self.is_busy() { CARD_BUSY_LABEL } else { CARD_IDLE_LABEL }
    }
}

/// Name for the downloaded card: the header's suggestion, else one derived from
/// the symbol with its currency sign dropped.
pub fn download_filename(content_disposition: Option<&str>, symbol: &str) -> String {
    content_disposition
        .filter(|header| header.contains("attachment"))
        .and_then(|header| FILENAME.captures(header))
        .map(|c| c[1].to_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{}_degen_card.png", symbol.replacen('$', "", 1)))
}

pub fn card_failure_message(err: &RemoteError) -> String {
    err.server_message().unwrap_or(CARD_FAILURE_MESSAGE).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_filename_wins() {
        assert_eq!(
            download_filename(Some(r#"attachment; filename="FOO_degen_card.png""#), "$BAR"),
            "FOO_degen_card.png"
        );
    }

    #[test]
    fn default_filename_strips_currency_sign() {
        assert_eq!(download_filename(None, "$FOO"), "FOO_degen_card.png");
        assert_eq!(download_filename(None, "FOO"), "FOO_degen_card.png");
    }

    #[test]
    fn inline_disposition_is_ignored() {
        assert_eq!(
            download_filename(Some(r#"inline; filename="x.png""#), "$FOO"),
            "FOO_degen_card.png"
        );
        assert_eq!(
            download_filename(Some("attachment"), "$FOO"),
            "FOO_degen_card.png"
        );
    }

    #[test]
    fn busy_label() {
        assert_eq!(CardJob::Idle.label(), CARD_IDLE_LABEL);
        assert_eq!(
            CardJob::InFlight { scan_generation: 3 }.label(),
            CARD_BUSY_LABEL
        );
    }

    #[test]
    fn failure_message_prefers_server_text() {
        let err = RemoteError::Service {
            status: 500,
            message: Some("renderer offline".into()),
        };
        assert_eq!(card_failure_message(&err), "renderer offline");
        assert_eq!(
            card_failure_message(&RemoteError::Transport("timeout".into())),
            CARD_FAILURE_MESSAGE
        );
    }
}
