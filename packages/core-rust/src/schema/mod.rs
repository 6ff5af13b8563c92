//! Two-tier validation.
//!
//! - [`envelope`] checks only the wire-level contract of a raw board response
//!   (top-level keys and their JSON types). Nested records are left as
//!   unvalidated payloads because they are normalized next.
//! - [`domain`] checks the normalized [`Board`](crate::types::Board) strictly.
//!   A failure there points at a normalizer bug rather than bad upstream data.
//!
//! Both tiers report through [`ValidationResult`]; issues render in the
//! `"path: message, path: message"` form.

pub mod domain;
pub mod envelope;

use std::fmt;

use serde::Serialize;

pub use domain::{assert_valid_board, validate_board, BoardAssertionError};
pub use envelope::{validate_board_response, BoardEnvelope};

pub(crate) const LOG_TARGET: &str = "courtboard::schema";

/// One validation failure at a dotted path (`courts.0.number`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Dotted path to the offending field. Empty for the root value.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Accumulated validation failures. Checks never stop at the first issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Issues(Vec<Issue>);

impl Issues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Whether any issue sits at `path` or below it.
    #[must_use]
    pub fn touches(&self, path: &str) -> bool {
        self.0.iter().any(|issue| {
            issue.path == path
                || issue
                    .path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// Wraps `value` as valid when no issues were collected.
    pub fn finish<T>(self, value: T) -> ValidationResult<T> {
        if self.is_empty() {
            ValidationResult::Valid(value)
        } else {
            ValidationResult::Invalid { issues: self }
        }
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Outcome of a non-throwing validation.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ValidationResult<T> {
    /// The value conforms to the schema.
    Valid(T),
    /// The value violates one or more schema constraints.
    Invalid {
        /// Every constraint that failed.
        issues: Issues,
    },
}

impl<T> ValidationResult<T> {
    #[must_use]
    pub fn success(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Valid(data) => Some(data),
            Self::Invalid { .. } => None,
        }
    }

    #[must_use]
    pub fn issues(&self) -> Option<&Issues> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { issues } => Some(issues),
        }
    }

    /// Converts into a `Result`, with the collected issues as the error.
    ///
    /// # Errors
    ///
    /// Returns the issues when validation failed.
    pub fn into_result(self) -> Result<T, Issues> {
        match self {
            Self::Valid(data) => Ok(data),
            Self::Invalid { issues } => Err(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_join_with_paths() {
        let mut issues = Issues::new();
        issues.push("courtId", "Required");
        issues.push("", "Expected object, received array");
        assert_eq!(
            issues.to_string(),
            "courtId: Required, Expected object, received array"
        );
    }

    #[test]
    fn finish_selects_variant() {
        assert!(Issues::new().finish(1).success());
        let mut issues = Issues::new();
        issues.push("a", "bad");
        let result = issues.finish(1);
        assert!(!result.success());
        assert!(result.data().is_none());
        assert_eq!(result.issues().map(Issues::len), Some(1));
    }

    #[test]
    fn touches_matches_path_prefixes_on_segment_boundaries() {
        let mut issues = Issues::new();
        issues.push("courts.1.number", "bad");
        assert!(issues.touches("courts.1"));
        assert!(issues.touches("courts.1.number"));
        assert!(!issues.touches("courts.10"));
        assert!(!issues.touches("courts.0"));
    }
}
