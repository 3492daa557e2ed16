//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).

use std::cell::RefCell;

use ds_scanner_core::{Controller, ScannerConfig, ThemePreference};
use tracing::warn;

use crate::api::FetchClient;
use crate::dom;
use crate::provider::PhantomProvider;
use crate::shell::BrowserShell;
use crate::theme::BrowserStore;

pub type AppController = Controller<PhantomProvider, FetchClient, FetchClient, BrowserShell>;

pub const CONFIG_META: &str = "degen-scanner-config";

thread_local! {
    static THEME: RefCell<Option<ThemePreference<BrowserStore>>> = const { RefCell::new(None) };
}

pub fn set_theme(pref: ThemePreference<BrowserStore>) {
    THEME.with(|t| *t.borrow_mut() = Some(pref));
}

/// Run a closure with mutable access to the theme preference, if restored.
pub fn with_theme<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ThemePreference<BrowserStore>) -> R,
{
    THEME.with(|t| t.borrow_mut().as_mut().map(f))
}

/// Defaults, overridden by `<meta name="degen-scanner-config" content="{json}">`.
pub fn load_config() -> ScannerConfig {
    let raw = dom::query(&format!("meta[name=\"{CONFIG_META}\"]"))
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|raw| !raw.trim().is_empty());
    match raw {
        Some(raw) => ScannerConfig::from_json(&raw).unwrap_or_else(|err| {
            warn!("ignoring invalid scanner config: {}", err);
            ScannerConfig::default()
        }),
        None => ScannerConfig::default(),
    }
}
