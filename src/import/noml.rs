//! NOML importer
//!
//! Turns YAML text into a [`NomlDocument`] and validates it. A call ends in
//! one of three states: nothing to show (blank input), a syntax failure, or a
//! parsed document with its diagnostics. Structurally invalid documents are
//! still returned so they can be rendered on a best-effort basis.

use super::ImportError;
use crate::models::NomlSchema;
use crate::validation::{
    ReferenceValidator, StructureValidator, ValidationOptions, ValidationResult,
};
use serde::Serialize;
use serde_yaml::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// A parsed NOML document
///
/// Wraps the generic YAML tree exactly as written. It is never mutated, and
/// clones share the same tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NomlDocument {
    value: Arc<Value>,
}

impl NomlDocument {
    pub fn new(value: Value) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Take the tree, cloning it only if other handles still share it
    pub fn into_value(self) -> Value {
        Arc::try_unwrap(self.value).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Convert the tree into the typed schema model
    pub fn to_schema(&self) -> Result<NomlSchema, ImportError> {
        serde_yaml::from_value(self.value.as_ref().clone())
            .map_err(|e| ImportError::Model(e.to_string()))
    }
}

impl Serialize for NomlDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.as_ref().serialize(serializer)
    }
}

/// Result of [`NomlImporter::parse_and_validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Blank input, or a document with no content
    Empty,
    /// The text could not be parsed; no validation ran
    SyntaxFailure { message: String },
    /// The text parsed; `validation` may still contain errors
    Parsed {
        document: NomlDocument,
        validation: ValidationResult,
    },
}

impl ParseOutcome {
    pub fn schema(&self) -> Option<&NomlDocument> {
        match self {
            ParseOutcome::Parsed { document, .. } => Some(document),
            _ => None,
        }
    }

    /// Validation verdict; a syntax failure reports invalid with no diagnostics
    pub fn validation(&self) -> Option<ValidationResult> {
        match self {
            ParseOutcome::Empty => None,
            ParseOutcome::SyntaxFailure { .. } => Some(ValidationResult::unparsed()),
            ParseOutcome::Parsed { validation, .. } => Some(validation.clone()),
        }
    }

    pub fn parse_error(&self) -> Option<&str> {
        match self {
            ParseOutcome::SyntaxFailure { message } => Some(message),
            _ => None,
        }
    }

    /// True only for a parsed document without errors
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseOutcome::Parsed { validation, .. } if validation.valid)
    }

    /// Flatten into the `{schema, validation, parseError}` report shape
    pub fn report(&self) -> ParseReport {
        ParseReport {
            schema: self.schema().cloned(),
            validation: self.validation(),
            parse_error: self.parse_error().map(str::to_string),
        }
    }
}

/// Serializable view of a [`ParseOutcome`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub schema: Option<NomlDocument>,
    pub validation: Option<ValidationResult>,
    pub parse_error: Option<String>,
}

/// NOML importer
///
/// Stateless apart from its options; each call depends only on its input.
#[derive(Debug, Clone, Default)]
pub struct NomlImporter {
    options: ValidationOptions,
}

impl NomlImporter {
    /// Create an importer with default validation options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Parse YAML text
    ///
    /// Returns `Ok(None)` for blank text or a document without content
    /// (e.g. only comments). Multi-document input is a syntax failure.
    /// `<<` merge keys are resolved into the mappings that use them.
    pub fn parse(&self, content: &str) -> Result<Option<NomlDocument>, ImportError> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let mut value: Value =
            serde_yaml::from_str(content).map_err(|e| ImportError::Syntax(e.to_string()))?;
        value
            .apply_merge()
            .map_err(|e| ImportError::Syntax(e.to_string()))?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(NomlDocument::new(value)))
    }

    /// Validate an already parsed document
    pub fn validate(&self, document: &NomlDocument) -> ValidationResult {
        let result = StructureValidator::new().validate(document.as_value());
        if !self.options.check_references {
            return result;
        }

        match document.to_schema() {
            Ok(schema) => result.with_warnings(ReferenceValidator::new().validate(&schema)),
            Err(e) => {
                warn!("Skipping reference checks: {}", e);
                result
            }
        }
    }

    /// Parse and validate in one step
    pub fn parse_and_validate(&self, content: &str) -> ParseOutcome {
        match self.parse(content) {
            Ok(None) => {
                debug!("Empty NOML input");
                ParseOutcome::Empty
            }
            Ok(Some(document)) => {
                let validation = self.validate(&document);
                debug!(
                    valid = validation.valid,
                    errors = validation.errors.len(),
                    warnings = validation.warnings.len(),
                    "Parsed NOML document"
                );
                ParseOutcome::Parsed {
                    document,
                    validation,
                }
            }
            Err(e) => {
                warn!("Failed to parse NOML: {}", e);
                ParseOutcome::SyntaxFailure {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Parse and validate NOML text with default options
pub fn parse_and_validate(content: &str) -> ParseOutcome {
    NomlImporter::new().parse_and_validate(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(parse_and_validate(""), ParseOutcome::Empty);
        assert_eq!(parse_and_validate("  \n\t\n"), ParseOutcome::Empty);
        assert_eq!(parse_and_validate("# only a comment\n"), ParseOutcome::Empty);
    }

    #[test]
    fn test_syntax_failure_keeps_message() {
        let outcome = parse_and_validate("collections: {users: [\n");
        let message = outcome.parse_error().unwrap();
        assert!(!message.is_empty());
        assert!(outcome.schema().is_none());
        assert_eq!(outcome.validation(), Some(ValidationResult::unparsed()));
    }

    #[test]
    fn test_invalid_document_is_still_returned() {
        let outcome = parse_and_validate("version: '1'\ncollections: {}\n");
        assert!(outcome.schema().is_some());
        assert!(!outcome.is_valid());
        assert_eq!(outcome.validation().unwrap().errors.len(), 2);
    }

    #[test]
    fn test_document_clones_share_tree() {
        let document = NomlImporter::new().parse("version: '1'").unwrap().unwrap();
        let copy = document.clone();
        assert!(std::ptr::eq(document.as_value(), copy.as_value()));
        drop(document);
        assert_eq!(copy.into_value()["version"], Value::from("1"));
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let outcome = parse_and_validate(
            r#"
version: '1'
database: firestore
shared:
  timestamp: &ts { type: timestamp }
collections:
  users:
    fields:
      createdAt: { <<: *ts, required: true }
"#,
        );
        assert!(outcome.is_valid());
        let document = outcome.schema().unwrap().as_value();
        let created_at = &document["collections"]["users"]["fields"]["createdAt"];
        assert_eq!(created_at["type"], Value::from("timestamp"));
        assert!(created_at.get("<<").is_none());
    }

    #[test]
    fn test_invalid_merge_value_is_syntax_failure() {
        let outcome = parse_and_validate("version: '1'\ncollections:\n  <<: 5\n");
        assert!(outcome.parse_error().is_some());
    }

    #[test]
    fn test_reference_checks_skipped_when_model_unreadable() {
        let importer = NomlImporter::with_options(ValidationOptions::new().check_references(true));
        let outcome = importer.parse_and_validate(
            "version: '1'\ndatabase: firestore\nenums: 5\ncollections:\n  c:\n    fields:\n      a: { type: Nope }\n",
        );
        let validation = outcome.validation().unwrap();
        assert!(validation.valid);
        assert!(validation.warnings.is_empty());
    }
}
