//! Light/dark preference persisted through a [`PreferenceStore`].
//!
//! If the store fails, the preference keeps working in memory for the rest of
//! the session.

use tracing::warn;

use crate::error::StorageError;
use crate::ports::PreferenceStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle, naming the theme it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.opposite() {
            Theme::Light => "☀️ Light Mode",
            Theme::Dark => "🌙 Dark Mode",
        }
    }
}

pub struct ThemePreference<S> {
    store: Option<S>,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Restore the persisted theme, or light.
    pub fn restore(store: Option<S>, key: &str) -> Self {
        let mut pref = Self {
            store,
            key: key.to_owned(),
            current: Theme::default(),
        };
        let saved = match pref.store.as_ref().map(|s| s.load(key)) {
            Some(Ok(saved)) => saved,
            Some(Err(err)) => {
                pref.degrade(&err);
                None
            }
            None => None,
        };
        pref.current = saved.as_deref().and_then(Theme::parse).unwrap_or_default();
        pref
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        if let Some(Err(err)) = self.store.as_ref().map(|s| s.save(&self.key, theme.as_str())) {
            self.degrade(&err);
        }
        theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.opposite())
    }

    fn degrade(&mut self, err: &StorageError) {
        warn!("theme preference kept in memory only: {}", err);
        self.store = None;
    }
}

impl<S: PreferenceStore> PreferenceStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: RefCell<HashMap<String, String>>,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota".into()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota".into()))
        }
    }

    #[test]
    fn defaults_to_light() {
        let store = MemoryStore::default();
        let pref = ThemePreference::restore(Some(&store), "theme");
        assert_eq!(pref.current(), Theme::Light);
        assert_eq!(pref.current().toggle_label(), "🌙 Dark Mode");
    }

    #[test]
    fn toggle_cycles_and_persists() {
        let store = MemoryStore::default();
        let mut pref = ThemePreference::restore(Some(&store), "theme");
        assert_eq!(pref.toggle(), Theme::Dark);
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(pref.toggle(), Theme::Light);
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("light"));

        pref.toggle();
        let reloaded = ThemePreference::restore(Some(&store), "theme");
        assert_eq!(reloaded.current(), Theme::Dark);
        assert_eq!(reloaded.current().toggle_label(), "☀️ Light Mode");
    }

    #[test]
    fn unknown_saved_value_falls_back_to_light() {
        let store = MemoryStore::default();
        store.save("theme", "sepia").unwrap();
        let pref = ThemePreference::restore(Some(&store), "theme");
        assert_eq!(pref.current(), Theme::Light);
    }

    #[test]
    fn broken_storage_degrades_to_memory() {
        let mut pref = ThemePreference::restore(Some(BrokenStore), "theme");
        assert!(!pref.is_persistent());
        assert_eq!(pref.toggle(), Theme::Dark);
        assert_eq!(pref.toggle(), Theme::Light);
    }
}
