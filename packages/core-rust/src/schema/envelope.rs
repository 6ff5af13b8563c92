//! Wire-level validation of a raw board response.
//!
//! Deliberately loose: only the top-level shape is checked. Failures are
//! logged and normalization proceeds best-effort.

use serde_json::Value;
use tracing::warn;

use super::{Issues, ValidationResult, LOG_TARGET};
use crate::aliases::{BOARD_COURTS, BOARD_SERVER_NOW, BOARD_WAITLIST};
use crate::raw::{json_kind, FieldAliases};

/// Top-level shape of a board response. Nested records are carried as
/// unvalidated JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardEnvelope {
    pub server_now: String,
    pub courts: Vec<Value>,
    /// Present when the response carried `waitlist` or `waitingGroups`.
    pub waitlist: Option<Vec<Value>>,
}

/// Validates the top-level structure of a raw board response.
///
/// Requires an object with a string `serverNow` and an array `courts`; a
/// `waitlist`/`waitingGroups` key, when present, must be an array.
pub fn validate_board_response(raw: &Value) -> ValidationResult<BoardEnvelope> {
    let mut issues = Issues::new();

    let Some(map) = raw.as_object() else {
        issues.push(
            "",
            format!("Expected object, received {}", json_kind(Some(raw))),
        );
        return report(issues.finish(empty_envelope()));
    };

    let server_now = match first_present(map, &BOARD_SERVER_NOW) {
        Some((_, Value::String(s))) => s.clone(),
        Some((key, other)) => {
            issues.push(key, expected("string", Some(other)));
            String::new()
        }
        None => {
            issues.push(BOARD_SERVER_NOW.field, "Required");
            String::new()
        }
    };

    let courts = match first_present(map, &BOARD_COURTS) {
        Some((_, Value::Array(items))) => items.clone(),
        Some((key, other)) => {
            issues.push(key, expected("array", Some(other)));
            Vec::new()
        }
        None => {
            issues.push(BOARD_COURTS.field, "Required");
            Vec::new()
        }
    };

    let waitlist = match first_present(map, &BOARD_WAITLIST) {
        Some((_, Value::Array(items))) => Some(items.clone()),
        Some((_, Value::Null)) | None => None,
        Some((key, other)) => {
            issues.push(key, expected("array", Some(other)));
            None
        }
    };

    report(issues.finish(BoardEnvelope {
        server_now,
        courts,
        waitlist,
    }))
}

fn first_present<'a>(
    map: &'a serde_json::Map<String, Value>,
    aliases: &FieldAliases,
) -> Option<(&'static str, &'a Value)> {
    aliases
        .keys
        .iter()
        .find_map(|key| map.get(*key).map(|v| (*key, v)))
}

fn expected(kind: &str, received: Option<&Value>) -> String {
    format!("Expected {kind}, received {}", json_kind(received))
}

fn empty_envelope() -> BoardEnvelope {
    BoardEnvelope {
        server_now: String::new(),
        courts: Vec::new(),
        waitlist: None,
    }
}

fn report(result: ValidationResult<BoardEnvelope>) -> ValidationResult<BoardEnvelope> {
    if let Some(issues) = result.issues() {
        warn!(
            target: LOG_TARGET,
            issue_count = issues.len(),
            issues = %issues,
            "board response failed envelope validation; normalizing best-effort"
        );
    }
    result
}
