//! Pure mapping from controller state to what the page shows.

use crate::card::CardJob;
use crate::scan::{ScanResult, ScanState};
use crate::wallet::{WalletSession, short_address};

pub const CONNECT_LABEL: &str = "Connect Wallet";
pub const INSTALL_LABEL: &str = "Install Phantom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportView {
    Hidden,
    /// Loading placeholder while a scan is pending.
    Empty,
    Markup(String),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub visible: bool,
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub connector_visible: bool,
    pub connect_button: ButtonView,
    pub scanner_visible: bool,
    pub wallet_label: Option<String>,
    pub loading_visible: bool,
    pub report: ReportView,
    pub card_button: ButtonView,
    pub share_visible: bool,
}

pub fn render(
    provider_available: bool,
    session: &WalletSession,
    scan: &ScanState,
    card: &CardJob,
) -> View {
    let connected = session.is_connected();
    let report = match scan.current() {
        None => ReportView::Hidden,
        Some(ScanResult::Pending) => ReportView::Empty,
        Some(ScanResult::Success(report)) => ReportView::Markup(report.markup.clone()),
        Some(ScanResult::Failure { message }) => ReportView::Failure(message.clone()),
    };
    let report_ready = matches!(report, ReportView::Markup(_));

    View {
        connector_visible: !connected,
        connect_button: ButtonView {
            visible: !connected,
            enabled: true,
            label: if provider_available { CONNECT_LABEL } else { INSTALL_LABEL },
        },
        scanner_visible: connected,
        wallet_label: session.public_id().map(short_address),
        loading_visible: scan.is_pending(),
        report,
        card_button: ButtonView {
            visible: report_ready,
            enabled: !card.is_busy(),
            label: card.label(),
        },
        share_visible: report_ready,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanRequest;
    use ds_api_types::AnalyzeResponse;

    #[test]
    fn fresh_page_without_provider_offers_install() {
        let view = render(
            false,
            &WalletSession::default(),
            &ScanState::default(),
            &CardJob::Idle,
        );
        assert!(view.connector_visible);
        assert_eq!(view.connect_button.label, INSTALL_LABEL);
        assert!(!view.scanner_visible);
        assert_eq!(view.report, ReportView::Hidden);
        assert!(!view.card_button.visible);
        assert!(!view.share_visible);
    }

    #[test]
    fn controls_follow_scan_result() {
        let mut session = WalletSession::default();
        session.connect("HgLjKiQoWK4HU4dBo9y1mP6QNu4af5vT51fFc6LupaVt");
        let mut scan = ScanState::default();
        let req = ScanRequest::new(&session, "TokenXYZ").unwrap();

        let ticket = scan.begin(&req);
        let pending = render(true, &session, &scan, &CardJob::Idle);
        assert!(pending.loading_visible);
        assert_eq!(pending.report, ReportView::Empty);
        assert!(!pending.card_button.visible);
        assert_eq!(pending.wallet_label.as_deref(), Some("HgLj...paVt"));

        scan.complete(
            ticket,
            Ok(AnalyzeResponse {
                report: Some("<h2>Token Report: Foo (FOO)</h2>".into()),
                snapshot: None,
            }),
        );
        let done = render(true, &session, &scan, &CardJob::Idle);
        assert!(!done.loading_visible);
        assert!(done.card_button.visible && done.card_button.enabled);
        assert!(done.share_visible);

        let busy = render(true, &session, &scan, &CardJob::InFlight { scan_generation: 1 });
        assert!(!busy.card_button.enabled);
        assert_eq!(busy.card_button.label, crate::card::CARD_BUSY_LABEL);
    }
}
