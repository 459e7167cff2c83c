//! Structural validation of a parsed NOML document
//!
//! Only the minimum required structure is checked: `version`, `database`,
//! at least one collection, at least one field per collection, and a `type`
//! on every field. Anything else in the tree passes through unexamined.

use super::diagnostics::{Diagnostic, ValidationResult, join_path};
use crate::models::SUPPORTED_DATABASE;
use crate::models::scalar::value_to_string;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// A collection waiting to be checked
struct PendingCollection<'a> {
    path: String,
    name: String,
    body: &'a Value,
}

/// Validator for the minimal required NOML structure
#[derive(Debug, Default, Clone, Copy)]
pub struct StructureValidator;

impl StructureValidator {
    /// Create a new structure validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a generic YAML tree
    ///
    /// Every violation is reported; traversal never stops at the first one.
    /// Collections are visited depth-first in mapping order, so repeated runs
    /// over the same tree produce identical diagnostics.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if is_absent(get(document, "version")) {
            errors.push(Diagnostic::error("version", "Version is required"));
        }

        let database = get(document, "database");
        if is_absent(database) {
            errors.push(Diagnostic::error("database", "Database type is required"));
        } else if let Some(database) = database
            && database.as_str() != Some(SUPPORTED_DATABASE)
        {
            warnings.push(Diagnostic::warning(
                "database",
                format!(
                    "Database \"{}\" is not fully supported. Some features may not render correctly.",
                    value_to_string(database)
                ),
            ));
        }

        match non_empty_mapping(get(document, "collections")) {
            None => errors.push(Diagnostic::error(
                "collections",
                "At least one collection is required",
            )),
            Some(collections) => self.check_collections(collections, &mut errors),
        }

        debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            "Structural validation finished"
        );
        ValidationResult::new(errors, warnings)
    }

    fn check_collections(&self, collections: &Mapping, errors: &mut Vec<Diagnostic>) {
        let mut stack = pending_children(collections, "collections");

        while let Some(collection) = stack.pop() {
            self.check_fields(&collection, errors);

            if let Some(subcollections) =
                get(collection.body, "subcollections").and_then(Value::as_mapping)
            {
                let prefix = join_path(&collection.path, "subcollections");
                stack.extend(pending_children(subcollections, &prefix));
            }
        }
    }

    fn check_fields(&self, collection: &PendingCollection<'_>, errors: &mut Vec<Diagnostic>) {
        let fields_path = join_path(&collection.path, "fields");
        let Some(fields) = non_empty_mapping(get(collection.body, "fields")) else {
            errors.push(Diagnostic::error(
                fields_path,
                format!("Collection \"{}\" must have at least one field", collection.name),
            ));
            return;
        };

        for (name, field) in fields {
            if is_absent(get(field, "type")) {
                let name = value_to_string(name);
                errors.push(Diagnostic::error(
                    join_path(&join_path(&fields_path, &name), "type"),
                    format!("Field \"{}\" must have a type", name),
                ));
            }
        }
    }
}

/// Validate a parsed NOML document with the structural rules
pub fn validate_noml(document: &Value) -> ValidationResult {
    StructureValidator::new().validate(document)
}

/// Children of `prefix` in reverse mapping order, ready to be popped in order
fn pending_children<'a>(collections: &'a Mapping, prefix: &str) -> Vec<PendingCollection<'a>> {
    let mut children: Vec<PendingCollection<'a>> = collections
        .iter()
        .map(|(name, body)| {
            let name = value_to_string(name);
            PendingCollection {
                path: join_path(prefix, &name),
                name,
                body: untag(body),
            }
        })
        .collect();
    children.reverse();
    children
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Look up `key` when `value` is a mapping
fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    untag(value).as_mapping()?.get(key).map(untag)
}

/// Missing, or a falsy scalar: null, `false`, zero, NaN or the empty string
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn non_empty_mapping(value: Option<&Value>) -> Option<&Mapping> {
    value?.as_mapping().filter(|m| !m.is_empty())
}
