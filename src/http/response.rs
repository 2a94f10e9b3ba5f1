//! Normalized server responses and `detail` message extraction.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A response whose body has been normalized to JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Normalize a raw body: empty becomes `null`, non-JSON text is wrapped
    /// as `{"detail": text}`.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::json!({ "detail": text }))
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The server's `detail` payload, if any.
    pub fn detail(&self) -> Option<&Value> {
        self.body.get("detail").filter(|d| !d.is_null())
    }

    /// Display message when the response reports an error.
    ///
    /// A `detail` payload always counts as an error; otherwise a non-success
    /// status without detail yields a status-based message.
    pub fn error_message(&self) -> Option<String> {
        if let Some(detail) = self.detail() {
            return Some(error_message(detail));
        }
        if !self.is_success() {
            return Some(format!("Request failed with status {}", self.status));
        }
        None
    }

    /// Deserialize the field holding domain data.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T, serde_json::Error> {
        let value = self.body.get(name).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value)
    }
}

/// Flatten a `detail` payload into a single display string.
pub fn error_message(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["error", "message", "msg"]
            .iter()
            .find_map(|k| map.get(*k))
            .map(error_message)
            .unwrap_or_else(|| detail.to_string()),
        Value::Array(items) => items
            .iter()
            .map(error_message)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_bodies() {
        assert_eq!(ApiResponse::from_text(204, "").body, Value::Null);
        assert_eq!(
            ApiResponse::from_text(500, "boom").body,
            json!({"detail": "boom"})
        );
        assert_eq!(
            ApiResponse::from_text(200, r#"{"a":1}"#).body,
            json!({"a": 1})
        );
    }

    #[test]
    fn detail_variants() {
        assert_eq!(error_message(&json!("plain")), "plain");
        assert_eq!(error_message(&json!({"error": "Invalid input"})), "Invalid input");
        assert_eq!(error_message(&json!({"message": "m"})), "m");
        assert_eq!(
            error_message(&json!([{"msg": "field a required"}, {"msg": "field b required"}])),
            "field a required, field b required"
        );
        assert_eq!(error_message(&json!({"code": 7})), r#"{"code":7}"#);
    }

    #[test]
    fn error_message_prefers_detail() {
        let resp = ApiResponse {
            status: 200,
            body: json!({"detail": {"error": "nope"}}),
        };
        assert_eq!(resp.error_message().as_deref(), Some("nope"));

        let resp = ApiResponse {
            status: 503,
            body: Value::Null,
        };
        assert_eq!(
            resp.error_message().as_deref(),
            Some("Request failed with status 503")
        );

        let ok = ApiResponse {
            status: 200,
            body: json!({"court_cases": []}),
        };
        assert!(ok.error_message().is_none());
    }
}
