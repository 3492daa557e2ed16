//! Light/dark theme on the document root.
//!
//! The preference itself lives in `ds_scanner_core::theme`; this module applies
//! it to `data-theme` and the toggle label, and backs it with `localStorage`.

use ds_scanner_core::{PreferenceStore, StorageError, Theme, ThemePreference};

use crate::dom::{self, Elements};
use crate::state;

/// `window.localStorage`, reading and writing raw strings.
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    /// `None` when storage is disabled (private mode, sandboxed frame).
    pub fn open() -> Option<Self> {
        let storage = dom::window().ok()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

pub fn restore(els: &Elements, key: &str) {
    let pref = ThemePreference::restore(BrowserStore::open(), key);
    let theme = pref.current();
    state::set_theme(pref);
    apply(els, theme);
}

pub fn toggle(els: &Elements) {
    if let Some(theme) = state::with_theme(|pref| pref.toggle()) {
        apply(els, theme);
    }
}

fn apply(els: &Elements, theme: Theme) {
    let _ = els.root.set_attribute("data-theme", theme.as_str());
    dom::set_text(&els.theme_toggle_btn, theme.toggle_label());
}
