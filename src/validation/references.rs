//! Reference checks
//!
//! Cross-checks the names a schema uses against what it declares: field
//! types against enums, reference targets and key/index fields against
//! collections, `collection.field` references, and enum transitions against
//! enum values. Every finding is a warning. These checks are opt-in, see
//! [`super::ValidationOptions::check_references`].

use super::diagnostics::{Diagnostic, join_path};
use crate::models::{CollectionDef, FieldDef, FieldKind, FirestoreType, NomlSchema};
use indexmap::IndexMap;
use regex::Regex;

/// Reference validator
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceValidator;

impl ReferenceValidator {
    /// Create a new reference validator
    pub fn new() -> Self {
        Self
    }

    /// Run all reference checks and return the resulting warnings
    pub fn validate(&self, schema: &NomlSchema) -> Vec<Diagnostic> {
        let mut warnings = Vec::new();

        if schema.updated_at.is_some() && schema.updated_at_date().is_none() {
            warnings.push(Diagnostic::warning(
                "updatedAt",
                "updatedAt is not an ISO-8601 date",
            ));
        }

        self.check_enums(schema, &mut warnings);

        for (path, _, collection) in schema.collections_tree() {
            self.check_fields(
                schema,
                &join_path(&path, "fields"),
                &collection.fields,
                &mut warnings,
            );
            self.check_keys(schema, &path, collection, &mut warnings);
            self.check_indexes(&path, collection, &mut warnings);
        }

        warnings
    }

    fn check_enums(&self, schema: &NomlSchema, warnings: &mut Vec<Diagnostic>) {
        for (name, def) in &schema.enums {
            let path = join_path("enums", name);
            if def.values.is_empty() {
                warnings.push(Diagnostic::warning(
                    join_path(&path, "values"),
                    format!("Enum \"{}\" has no values", name),
                ));
            }

            for (from, targets) in &def.transitions {
                let transition_path = join_path(&join_path(&path, "transitions"), from);
                if !def.contains(from) {
                    warnings.push(Diagnostic::warning(
                        transition_path.clone(),
                        format!("Transition source \"{}\" is not a value of enum \"{}\"", from, name),
                    ));
                }
                for to in targets.iter().filter(|to| !def.contains(to)) {
                    warnings.push(Diagnostic::warning(
                        transition_path.clone(),
                        format!("Transition target \"{}\" is not a value of enum \"{}\"", to, name),
                    ));
                }
            }
        }
    }

    fn check_fields(
        &self,
        schema: &NomlSchema,
        prefix: &str,
        fields: &IndexMap<String, FieldDef>,
        warnings: &mut Vec<Diagnostic>,
    ) {
        for (name, field) in fields {
            let path = join_path(prefix, name);

            match &field.kind {
                FieldKind::Named(type_name) if !schema.enums.contains_key(type_name) => {
                    warnings.push(Diagnostic::warning(
                        join_path(&path, "type"),
                        format!(
                            "Type \"{}\" is neither a Firestore type nor a declared enum",
                            type_name
                        ),
                    ));
                }
                FieldKind::Reference { target: None } => {
                    warnings.push(Diagnostic::warning(
                        join_path(&path, "target"),
                        format!("Reference field \"{}\" must declare a target", name),
                    ));
                }
                FieldKind::Reference {
                    target: Some(target),
                } if schema.find_collection(target).is_none() => {
                    warnings.push(Diagnostic::warning(
                        join_path(&path, "target"),
                        format!("Target collection \"{}\" does not exist", target),
                    ));
                }
                FieldKind::Array { items: None } => {
                    warnings.push(Diagnostic::warning(
                        join_path(&path, "items"),
                        format!("Array field \"{}\" must declare its item type", name),
                    ));
                }
                FieldKind::Array { items: Some(items) } => {
                    let item_type = items.type_name();
                    if item_type.parse::<FirestoreType>().is_err()
                        && !schema.enums.contains_key(item_type)
                    {
                        warnings.push(Diagnostic::warning(
                            join_path(&path, "items"),
                            format!(
                                "Item type \"{}\" is neither a Firestore type nor a declared enum",
                                item_type
                            ),
                        ));
                    }
                }
                FieldKind::Map { fields } => {
                    self.check_fields(schema, &join_path(&path, "fields"), fields, warnings);
                }
                _ => {}
            }

            if let Some(from) = &field.denormalized_from {
                self.check_reference(
                    schema,
                    &join_path(&path, "denormalizedFrom"),
                    &from.display_path(),
                    from.target(),
                    warnings,
                );
            }

            if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref())
                && let Err(e) = Regex::new(pattern)
            {
                warnings.push(Diagnostic::warning(
                    join_path(&join_path(&path, "validation"), "pattern"),
                    format!("Pattern is not a valid regular expression: {}", e),
                ));
            }
        }
    }

    fn check_keys(
        &self,
        schema: &NomlSchema,
        path: &str,
        collection: &CollectionDef,
        warnings: &mut Vec<Diagnostic>,
    ) {
        let Some(keys) = &collection.keys else {
            return;
        };
        let keys_path = join_path(path, "keys");
        let mut require_field = |field_path: String, field: &str| {
            if collection.resolve_field(field).is_none() {
                warnings.push(Diagnostic::warning(
                    field_path,
                    format!("Field \"{}\" is not defined in this collection", field),
                ));
            }
        };

        if let Some(primary) = &keys.primary {
            require_field(join_path(&keys_path, "primary"), primary);
        }
        for (i, unique) in keys.unique.iter().enumerate() {
            require_field(format!("{}.unique.{}.field", keys_path, i), &unique.field);
        }
        for (i, composite) in keys.composite_unique.iter().enumerate() {
            for (j, field) in composite.fields.iter().enumerate() {
                require_field(
                    format!("{}.compositeUnique.{}.fields.{}", keys_path, i, j),
                    field,
                );
            }
        }
        for (i, foreign) in keys.foreign.iter().enumerate() {
            require_field(format!("{}.foreign.{}.field", keys_path, i), &foreign.field);
        }

        for (i, foreign) in keys.foreign.iter().enumerate() {
            self.check_reference(
                schema,
                &format!("{}.foreign.{}.references", keys_path, i),
                &foreign.references,
                foreign.target(),
                warnings,
            );
        }
    }

    fn check_indexes(&self, path: &str, collection: &CollectionDef, warnings: &mut Vec<Diagnostic>) {
        for (i, index) in collection.indexes.iter().enumerate() {
            for (j, field) in index.resolved_fields().iter().enumerate() {
                if collection.resolve_field(field.field).is_none() {
                    warnings.push(Diagnostic::warning(
                        format!("{}.indexes.{}.fields.{}", path, i, j),
                        format!("Index field \"{}\" is not defined in this collection", field.field),
                    ));
                }
            }
        }
    }

    fn check_reference(
        &self,
        schema: &NomlSchema,
        path: &str,
        raw: &str,
        target: Option<(&str, &str)>,
        warnings: &mut Vec<Diagnostic>,
    ) {
        let Some((collection_name, field)) = target else {
            warnings.push(Diagnostic::warning(
                path,
                format!("Reference \"{}\" must have the form collection.field", raw),
            ));
            return;
        };

        match schema.find_collection(collection_name) {
            None => warnings.push(Diagnostic::warning(
                path,
                format!("Collection \"{}\" does not exist", collection_name),
            )),
            Some(collection) if collection.resolve_field(field).is_none() => {
                warnings.push(Diagnostic::warning(
                    path,
                    format!(
                        "Field \"{}\" does not exist in collection \"{}\"",
                        field, collection_name
                    ),
                ))
            }
            Some(_) => {}
        }
    }
}
