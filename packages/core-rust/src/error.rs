//! Normalization of transport and service failures into [`DomainError`].
//!
//! Whatever a transport throws is funnelled through
//! [`normalize_service_error`], which classifies it by shape into a small
//! [`ErrorCode`] set. The original message text is kept verbatim for display
//! and the original value is kept as `cause` for logs. Only the `service`/`op`
//! names of the [`ErrorContext`] are exposed as safe details.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Message used when a thrown value carries no readable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

// ---------------------------------------------------------------------------
// Thrown values
// ---------------------------------------------------------------------------

/// A failure as raised by a transport, before normalization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThrownError {
    /// Already normalized; passes through untouched.
    #[error(transparent)]
    Domain(DomainError),
    /// Type error raised by the fetch layer (e.g. a failed request).
    #[error("TypeError: {0}")]
    Type(String),
    #[error("{0}")]
    Error(String),
    /// A structured object, such as a database or edge function error body.
    #[error("{0}")]
    Payload(Value),
}

impl From<DomainError> for ThrownError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<anyhow::Error> for ThrownError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => Self::Domain(domain),
            Err(other) => Self::Error(format!("{other:#}")),
        }
    }
}

// ---------------------------------------------------------------------------
// DomainError
// ---------------------------------------------------------------------------

/// Fixed classification of service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Database error: `{code, details|hint}`.
    DbError,
    /// Edge function error: `{status, body}`.
    EdgeFnError,
    Network,
    Unknown,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DbError => "DB_ERROR",
            Self::EdgeFnError => "EDGE_FN_ERROR",
            Self::Network => "NETWORK",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an error happened. Names only, never request contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorContext {
    pub service: String,
    pub op: String,
}

impl ErrorContext {
    pub fn new(service: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            op: op.into(),
        }
    }
}

/// The single normalized error shape surfaced to callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    pub code: ErrorCode,
    /// Original message text, unmodified.
    pub message: String,
    pub safe_details: ErrorContext,
    /// The value that was thrown. Kept for logs; never serialized.
    #[source]
    pub cause: Option<Arc<ThrownError>>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>, context: &ErrorContext) -> Self {
        Self {
            code,
            message: message.into(),
            safe_details: context.clone(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ThrownError) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }
}

impl Serialize for DomainError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DomainError", 4)?;
        state.serialize_field("name", "DomainError")?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("safeDetails", &self.safe_details)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalizes any thrown value into a [`DomainError`].
///
/// Idempotent: a [`ThrownError::Domain`] is returned as-is, context
/// included, so errors are never double-wrapped.
#[must_use]
pub fn normalize_service_error(err: ThrownError, context: &ErrorContext) -> DomainError {
    let (code, message) = match err {
        ThrownError::Domain(domain) => return domain,
        ThrownError::Type(ref message) => {
            let lower = message.to_lowercase();
            let code = if lower.contains("fetch") || lower.contains("network") {
                ErrorCode::Network
            } else {
                ErrorCode::Unknown
            };
            (code, message.clone())
        }
        ThrownError::Error(ref message) => {
            let code = if message.to_lowercase().contains("network") {
                ErrorCode::Network
            } else {
                ErrorCode::Unknown
            };
            (code, message.clone())
        }
        ThrownError::Payload(ref value) => (classify_payload(value), payload_message(value)),
    };

    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    };
    DomainError::new(code, message, context).with_cause(err)
}

fn classify_payload(value: &Value) -> ErrorCode {
    let Some(map) = value.as_object() else {
        return ErrorCode::Unknown;
    };
    let has = |key: &str| map.get(key).is_some_and(|v| !v.is_null());

    if has("code") && (has("details") || has("hint")) {
        ErrorCode::DbError
    } else if has("status") && has("body") {
        ErrorCode::EdgeFnError
    } else if map
        .get("message")
        .and_then(Value::as_str)
        .is_some_and(|m| m.to_lowercase().contains("network"))
    {
        ErrorCode::Network
    } else {
        ErrorCode::Unknown
    }
}

/// First readable message among `message`, `error`, `body.error`,
/// `body.message` and `hint`.
fn payload_message(value: &Value) -> String {
    if let Value::String(s) = value {
        return s.clone();
    }
    fn text(v: Option<&Value>) -> Option<&str> {
        v.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    let body = value.get("body");
    text(value.get("message"))
        .or_else(|| text(value.get("error")))
        .or_else(|| text(body.and_then(|b| b.get("error"))))
        .or_else(|| text(body.and_then(|b| b.get("message"))))
        .or_else(|| text(value.get("hint")))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ctx() -> ErrorContext {
        ErrorContext::new("courtboard", "getBoard")
    }

    #[test]
    fn database_shape_classified() {
        let err = normalize_service_error(
            ThrownError::Payload(json!({"code": "23505", "details": "dup", "message": "duplicate key"})),
            &ctx(),
        );
        assert_eq!(err.code, ErrorCode::DbError);
        assert_eq!(err.message, "duplicate key");

        let hinted = normalize_service_error(
            ThrownError::Payload(json!({"code": "42501", "hint": "check policy"})),
            &ctx(),
        );
        assert_eq!(hinted.code, ErrorCode::DbError);
        assert_eq!(hinted.message, "check policy");
    }

    #[test]
    fn edge_function_shape_classified() {
        let err = normalize_service_error(
            ThrownError::Payload(json!({"status": 409, "body": {"error": "Court 3 is occupied"}})),
            &ctx(),
        );
        assert_eq!(err.code, ErrorCode::EdgeFnError);
        assert_eq!(err.message, "Court 3 is occupied");
    }

    #[test]
    fn network_failures_classified() {
        let fetch = normalize_service_error(ThrownError::Type("Failed to fetch".into()), &ctx());
        assert_eq!(fetch.code, ErrorCode::Network);
        let network = normalize_service_error(ThrownError::Error("Network request failed".into()), &ctx());
        assert_eq!(network.code, ErrorCode::Network);
        let other = normalize_service_error(ThrownError::Type("x is undefined".into()), &ctx());
        assert_eq!(other.code, ErrorCode::Unknown);
    }

    #[test]
    fn message_preserved_verbatim() {
        let raw = "relation \"courts\" does not exist at character 15";
        let err = normalize_service_error(ThrownError::Error(raw.into()), &ctx());
        assert_eq!(err.message, raw);
        assert_eq!(err.to_string(), raw);
    }

    #[test]
    fn missing_message_falls_back() {
        let err = normalize_service_error(ThrownError::Payload(json!({"status": 500})), &ctx());
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
        let empty = normalize_service_error(ThrownError::Error(String::new()), &ctx());
        assert_eq!(empty.message, UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn payload_message_skips_empty_and_non_string_fields() {
        let err = normalize_service_error(
            ThrownError::Payload(json!({
                "message": "",
                "error": {"detail": "nested"},
                "body": {"error": null, "message": "Waitlist entry already assigned"}
            })),
            &ctx(),
        );
        assert_eq!(err.message, "Waitlist entry already assigned");
        let bare = normalize_service_error(ThrownError::Payload(json!("plain text")), &ctx());
        assert_eq!(bare.message, "plain text");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_service_error(ThrownError::Error("boom".into()), &ctx());
        let second = normalize_service_error(
            ThrownError::Domain(first.clone()),
            &ErrorContext::new("other", "otherOp"),
        );
        assert_eq!(first, second);
        assert!(matches!(
            second.cause.as_deref(),
            Some(ThrownError::Error(m)) if m == "boom"
        ));
    }

    #[test]
    fn cause_kept_but_not_serialized() {
        let err = normalize_service_error(ThrownError::Error("boom".into()), &ctx());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "name": "DomainError",
                "code": "UNKNOWN",
                "message": "boom",
                "safeDetails": {"service": "courtboard", "op": "getBoard"}
            })
        );
    }

    #[test]
    fn anyhow_errors_convert() {
        let thrown: ThrownError = anyhow::anyhow!("network unreachable").into();
        assert_eq!(normalize_service_error(thrown, &ctx()).code, ErrorCode::Network);

        let domain = DomainError::new(ErrorCode::DbError, "x", &ctx());
        let thrown: ThrownError = anyhow::Error::new(domain.clone()).into();
        assert_eq!(thrown, ThrownError::Domain(domain));
    }
}
