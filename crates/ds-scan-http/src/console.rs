//! Headless collaborators for driving the controller from a terminal.

use std::path::PathBuf;

use async_trait::async_trait;
use ds_scanner_core::{CardImage, ReportView, Shell, View, WalletError, WalletProvider};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Wallet that is always connected to the given identifier.
pub struct FixedWallet {
    public_id: String,
}

impl FixedWallet {
    pub fn new(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for FixedWallet {
    async fn connect(&self, _only_if_trusted: bool) -> Result<String, WalletError> {
        if self.public_id.trim().is_empty() {
            return Err(WalletError::Rejected("no wallet identifier configured".into()));
        }
        Ok(self.public_id.clone())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }
}

/// Prints reports and alerts, writes card downloads into `out_dir`.
pub struct ConsoleShell {
    out_dir: PathBuf,
}

impl ConsoleShell {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl Shell for ConsoleShell {
    fn render(&self, view: &View) {
        debug!(report = ?view.report, loading = view.loading_visible, "render");
        if let ReportView::Markup(markup) = &view.report {
            println!("{markup}");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn download(&self, filename: &str, image: &CardImage) {
        let path = self.out_dir.join(filename);
        match std::fs::write(&path, &image.bytes) {
            Ok(()) => info!(path = %path.display(), "card saved"),
            Err(err) => error!(path = %path.display(), "failed to save card: {}", err),
        }
    }

    fn open_url(&self, url: &str) {
        println!("{url}");
    }
}
