//! Scan a token from the terminal.
//!
//! Usage: `ds-scan <wallet> <token-address> [--card] [--share]`

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use ds_scan_http::HttpScanClient;
use ds_scan_http::console::{ConsoleShell, FixedWallet, init_logging};
use ds_scanner_core::{CardOutcome, Controller, ScanOutcome, ScannerConfig};

#[derive(Parser, Debug)]
#[command(name = "ds-scan")]
#[command(about = "Scan a Solana token and optionally fetch its degen card")]
struct Cli {
    /// Wallet identifier the scan is made for
    wallet: String,

    /// Token address to scan
    token: String,

    /// Also generate the degen card and save it
    #[arg(long)]
    card: bool,

    /// Print the share intent URL for the report
    #[arg(long)]
    share: bool,

    /// Service base URL (defaults to $DEGEN_SCANNER_API, then localhost:5000)
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory the card is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ScannerConfig::default();
    init_logging(&config.log_level);

    let client = HttpScanClient::new(cli.endpoint)?;
    let controller = Controller::new(
        config,
        Some(FixedWallet::new(cli.wallet)),
        client.clone(),
        client,
        ConsoleShell::new(cli.out_dir),
    );

    controller.connect().await?;
    match controller.start_scan(&cli.token).await {
        ScanOutcome::Succeeded => {}
        outcome => bail!("scan did not complete: {outcome:?}"),
    }

    if cli.card {
        match controller.generate_card().await {
            CardOutcome::Downloaded(filename) => println!("saved {filename}"),
            CardOutcome::Failed(message) => bail!("card generation failed: {message}"),
            outcome => bail!("card not generated: {outcome:?}"),
        }
    }
    if cli.share {
        controller.share();
    }
    Ok(())
}
