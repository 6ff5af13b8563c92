//! Structural reader for raw UI input.
//!
//! Every accessor records an issue instead of failing, so a builder reports
//! all problems in one error.

use serde_json::{Map, Value};

use super::{CommandValidationError, COMMAND_VERSION};
use crate::clock;
use crate::raw::json_kind;
use crate::schema::Issues;

pub(crate) struct CommandInput<'a> {
    map: Option<&'a Map<String, Value>>,
    issues: Issues,
}

impl<'a> CommandInput<'a> {
    pub(crate) fn new(raw: &'a Value) -> Self {
        let mut issues = Issues::new();
        let map = raw.as_object();
        if map.is_none() {
            issues.push("", format!("Expected object, received {}", json_kind(Some(raw))));
        }
        Self { map, issues }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(path, message);
    }

    pub(crate) fn has_issue_at(&self, path: &str) -> bool {
        self.issues.touches(path)
    }

    /// A present, non-empty (after trimming) string.
    pub(crate) fn required_string(&mut self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::String(_)) => {
                self.issue(key, "String must contain at least 1 character(s)");
                String::new()
            }
            Some(other) => {
                self.issue(key, format!("Expected string, received {}", json_kind(Some(other))));
                String::new()
            }
            None if self.map.is_some() => {
                self.issue(key, "Required");
                String::new()
            }
            None => String::new(),
        }
    }

    /// An optional string; blank strings count as absent.
    pub(crate) fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Some(other) => {
                self.issue(key, format!("Expected string, received {}", json_kind(Some(other))));
                None
            }
            None => None,
        }
    }

    pub(crate) fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.issue(key, format!("Expected boolean, received {}", json_kind(Some(other))));
                default
            }
            None => default,
        }
    }

    /// A required RFC 3339 timestamp string.
    pub(crate) fn timestamp(&mut self, key: &str) -> String {
        let value = self.required_string(key);
        if !value.is_empty() && clock::parse_instant(&value).is_none() {
            self.issue(key, "Invalid datetime");
        }
        value
    }

    /// A required array.
    pub(crate) fn array(&mut self, key: &str) -> &'a [Value] {
        match self.get(key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.issue(key, format!("Expected array, received {}", json_kind(Some(other))));
                &[]
            }
            None if self.map.is_some() => {
                self.issue(key, "Required");
                &[]
            }
            None => &[],
        }
    }

    /// An optional array of non-blank strings; absent means empty.
    pub(crate) fn string_list(&mut self, key: &str) -> Vec<String> {
        let items = match self.get(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.issue(key, format!("Expected array, received {}", json_kind(Some(other))));
                return Vec::new();
            }
        };
        let mut list = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) if !s.trim().is_empty() => list.push(s.trim().to_string()),
                Value::String(_) => {
                    self.issue(format!("{key}.{i}"), "String must contain at least 1 character(s)");
                }
                other => {
                    self.issue(
                        format!("{key}.{i}"),
                        format!("Expected string, received {}", json_kind(Some(other))),
                    );
                }
            }
        }
        list
    }

    /// An optional string tag parsed into an enum.
    pub(crate) fn optional_enum<T>(
        &mut self,
        key: &str,
        allowed: &[&str],
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let tag = self.optional_string(key)?;
        let parsed = parse(&tag);
        if parsed.is_none() {
            let expected = allowed
                .iter()
                .map(|a| format!("'{a}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            self.issue(
                key,
                format!("Invalid enum value. Expected {expected}, received '{tag}'"),
            );
        }
        parsed
    }

    /// `commandVersion` when supplied must match [`COMMAND_VERSION`].
    pub(crate) fn command_version(&mut self) -> u32 {
        match self.get("commandVersion") {
            None => COMMAND_VERSION,
            Some(v) if v.as_u64() == Some(u64::from(COMMAND_VERSION)) => COMMAND_VERSION,
            Some(v) => {
                self.issue(
                    "commandVersion",
                    format!("Unsupported command version {v}, expected {COMMAND_VERSION}"),
                );
                COMMAND_VERSION
            }
        }
    }

    /// Returns the command when no issue was recorded.
    pub(crate) fn finish<C>(self, command_name: &'static str, command: C) -> Result<C, CommandValidationError> {
        if self.issues.is_empty() {
            Ok(command)
        } else {
            Err(CommandValidationError {
                command: command_name,
                issues: self.issues,
            })
        }
    }
}

/// Reader over one element of an input array, sharing the parent's issue list
/// with a path prefix.
pub(crate) struct ItemInput<'p, 'a> {
    parent: &'p mut CommandInput<'a>,
    prefix: String,
    map: Option<&'a Map<String, Value>>,
}

impl<'p, 'a> ItemInput<'p, 'a> {
    pub(crate) fn new(parent: &'p mut CommandInput<'a>, prefix: String, raw: &'a Value) -> Self {
        let map = raw.as_object();
        if map.is_none() {
            parent.issue(
                prefix.clone(),
                format!("Expected object, received {}", json_kind(Some(raw))),
            );
        }
        Self { parent, prefix, map }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn issue(&mut self, key: &str, message: impl Into<String>) {
        self.parent.issue(format!("{}.{key}", self.prefix), message);
    }

    pub(crate) fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                let message = format!("Expected string, received {}", json_kind(Some(other)));
                self.issue(key, message);
                None
            }
            None => None,
        }
    }

    pub(crate) fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                let message = format!("Expected boolean, received {}", json_kind(Some(other)));
                self.issue(key, message);
                default
            }
            None => default,
        }
    }
}
