use serde::{Deserialize, Serialize};

pub const ANALYZE_PATH: &str = "/analyze";
pub const GENERATE_CARD_PATH: &str = "/generate_ai_card";

/// Placeholder used for any report field the service did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub user_wallet: String,
    pub token_address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub snapshot: Option<ReportSnapshot>,
}

/// Structured subset of a scan report consumed by card generation and sharing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSnapshot {
    #[serde(default = "not_available")]
    pub name: String,
    #[serde(default = "not_available")]
    pub symbol: String,
    #[serde(default = "not_available", rename = "fdv")]
    pub market_cap_display: String,
    #[serde(default)]
    pub degen_score: u32,
}

impl Default for ReportSnapshot {
    fn default() -> Self {
        Self {
            name: not_available(),
            symbol: not_available(),
            market_cap_display: not_available(),
            degen_score: 0,
        }
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardRequest {
    pub name: String,
    pub symbol: String,
    pub fdv: String,
    pub degen_score: u32,
}

impl From<&ReportSnapshot> for CardRequest {
    fn from(snapshot: &ReportSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            symbol: snapshot.symbol.clone(),
            fdv: snapshot.market_cap_display.clone(),
            degen_score: snapshot.degen_score,
        }
    }
}

/// Error body returned by both services with a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_uses_wire_field_names() {
        let req = AnalyzeRequest {
            user_wallet: "Abcd...wxyz".to_owned(),
            token_address: "TokenXYZ".to_owned(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "user_wallet": "Abcd...wxyz", "token_address": "TokenXYZ" })
        );
    }

    #[test]
    fn snapshot_fields_default_when_missing() {
        let snapshot: ReportSnapshot = serde_json::from_str(r#"{"name":"Foo"}"#).unwrap();
        assert_eq!(snapshot.name, "Foo");
        assert_eq!(snapshot.symbol, NOT_AVAILABLE);
        assert_eq!(snapshot.market_cap_display, NOT_AVAILABLE);
        assert_eq!(snapshot.degen_score, 0);
    }

    #[test]
    fn card_request_echoes_snapshot() {
        let snapshot = ReportSnapshot {
            name: "Foo".to_owned(),
            symbol: "$FOO".to_owned(),
            market_cap_display: "$12,000.00".to_owned(),
            degen_score: 7,
        };
        let value = serde_json::to_value(CardRequest::from(&snapshot)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Foo",
                "symbol": "$FOO",
                "fdv": "$12,000.00",
                "degen_score": 7,
            })
        );
    }

    #[test]
    fn error_body_tolerates_missing_field() {
        let body: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error, None);
    }
}
