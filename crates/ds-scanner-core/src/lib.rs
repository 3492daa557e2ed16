//! Client-side controller for the degen token scanner.
//!
//! Platform independent: the browser build and the native HTTP transport both
//! plug into the traits in [`ports`].

pub mod card;
pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod report;
pub mod scan;
pub mod share;
pub mod theme;
pub mod view;
pub mod wallet;

pub use config::ScannerConfig;
pub use controller::{CardOutcome, Controller, ScanOutcome};
pub use error::{Precondition, RemoteError, StorageError, WalletError};
pub use ports::{CardImage, CardService, PreferenceStore, ScanService, Shell, WalletProvider};
pub use theme::{Theme, ThemePreference};
pub use view::{ReportView, View};
pub use wallet::{SessionChange, WalletSession};
