//! Diagnostic types shared by all validators

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A path-addressed validation finding
///
/// `path` is dot-delimited, one segment per nesting level, e.g.
/// `collections.posts.subcollections.comments.fields.text.type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Verdict of a validation pass
///
/// `valid` is true exactly when `errors` is empty; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new(errors: Vec<Diagnostic>, warnings: Vec<Diagnostic>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Result reported for a document that never parsed: invalid, with no diagnostics
    pub fn unparsed() -> Self {
        Self {
            valid: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Append warnings from a further pass
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Errors followed by warnings
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Dot-join a path prefix and a segment
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tracks_errors_only() {
        let result = ValidationResult::new(vec![], vec![Diagnostic::warning("database", "x")]);
        assert!(result.valid);

        let result = ValidationResult::new(vec![Diagnostic::error("version", "x")], vec![]);
        assert!(!result.valid);
    }

    #[test]
    fn test_serialized_shape() {
        let result = ValidationResult::new(
            vec![Diagnostic::error("version", "Version is required")],
            vec![],
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "errors": [{ "path": "version", "message": "Version is required", "severity": "error" }],
                "warnings": []
            })
        );
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "version"), "version");
        assert_eq!(join_path("collections.users", "fields"), "collections.users.fields");
    }
}
