use serde::{Deserialize, Serialize};

pub const DEFAULT_SHARE_INTENT_BASE: &str = "https://x.com/intent/tweet";
pub const DEFAULT_INSTALL_URL: &str = "https://phantom.app/";
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Runtime settings. Every field is optional in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Prefix for service paths. Empty means same origin.
    pub api_base: String,
    pub share_intent_base: String,
    pub install_url: String,
    pub theme_key: String,
    pub log_level: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            share_intent_base: DEFAULT_SHARE_INTENT_BASE.to_owned(),
            install_url: DEFAULT_INSTALL_URL.to_owned(),
            theme_key: DEFAULT_THEME_KEY.to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl ScannerConfig {
    /// Parse a JSON override; unknown or missing keys fall back to defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = ScannerConfig::from_json(r#"{"api_base":"https://scan.example/"}"#).unwrap();
        assert_eq!(cfg.endpoint("/analyze"), "https://scan.example/analyze");
        assert_eq!(cfg.install_url, DEFAULT_INSTALL_URL);
        assert_eq!(cfg.theme_key, "theme");
    }

    #[test]
    fn same_origin_by_default() {
        assert_eq!(ScannerConfig::default().endpoint("/analyze"), "/analyze");
    }
}
