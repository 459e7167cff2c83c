//! Output formatting for CLI

use super::error::CliError;
use crate::import::ParseOutcome;
use crate::models::{CollectionDef, EnumDef, FieldDef, NomlSchema, SortOrder};
use crate::validation::Diagnostic;
use indexmap::IndexMap;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Format a parse outcome as human-readable text
pub fn format_validation_text(outcome: &ParseOutcome) -> String {
    let mut output = String::new();

    match outcome {
        ParseOutcome::Empty => {
            output.push_str("⚠️  Input is empty, nothing to validate\n");
        }
        ParseOutcome::SyntaxFailure { message } => {
            output.push_str(&format!("❌ YAML parse error:\n  {}\n", message));
        }
        ParseOutcome::Parsed { validation, .. } => {
            push_diagnostics(&mut output, "❌ Errors", &validation.errors);
            push_diagnostics(&mut output, "⚠️  Warnings", &validation.warnings);

            if validation.valid {
                output.push_str("\n✅ Schema is valid\n");
            } else {
                output.push_str(&format!(
                    "\n❌ Schema has {} error(s)\n",
                    validation.errors.len()
                ));
            }
        }
    }

    output
}

fn push_diagnostics(output: &mut String, heading: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    output.push_str(&format!("\n{}:\n", heading));
    for diagnostic in diagnostics {
        output.push_str(&format!("  - {}\n", diagnostic));
    }
}

/// Format a parse outcome as the JSON `{schema, validation, parseError}` report
pub fn format_report_json(outcome: &ParseOutcome) -> Result<String, CliError> {
    serde_json::to_string_pretty(&outcome.report())
        .map_err(|e| CliError::InvalidArgument(format!("Failed to serialize report: {}", e)))
}

/// Format a readable summary of a schema
pub fn format_schema_summary(schema: &NomlSchema) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", schema.display_name()));
    if let Some(description) = schema.display_description() {
        output.push_str(&format!("  {}\n", description));
    }
    output.push_str(&format!(
        "  Version: {}  Database: {}\n",
        schema.version.as_deref().unwrap_or("-"),
        schema.database.as_deref().unwrap_or("-")
    ));
    if let Some(author) = schema.metadata.as_ref().and_then(|m| m.author.as_deref()) {
        output.push_str(&format!("  Author: {}\n", author));
    }
    if let Some(updated_at) = &schema.updated_at {
        output.push_str(&format!("  Updated: {}\n", updated_at));
    }

    if !schema.enums.is_empty() {
        output.push_str(&format!("\nEnums ({}):\n", schema.enums.len()));
        for (name, def) in &schema.enums {
            push_enum(&mut output, name, def);
        }
    }

    output.push_str(&format!("\nCollections ({}):\n", schema.collections.len()));
    for (path, name, collection) in schema.collections_tree() {
        let depth = path.matches(".subcollections.").count();
        push_collection(&mut output, schema, name, collection, depth);
    }

    output
}

fn push_enum(output: &mut String, name: &str, def: &EnumDef) {
    output.push_str(&format!("  {} ({} values)", name, def.values.len()));
    if let Some(description) = &def.description {
        output.push_str(&format!(" - {}", description));
    }
    output.push('\n');

    if def.has_detailed_values() {
        for value in &def.values {
            output.push_str(&format!("    {}", value.canonical()));
            if let Some(label) = value.label() {
                output.push_str(&format!("  {}", label));
            }
            if let Some(description) = value.description() {
                output.push_str(&format!("  - {}", description));
            }
            output.push('\n');
        }
    } else {
        output.push_str(&format!("    [{}]\n", def.canonical_values().join(", ")));
    }

    for (from, targets) in &def.transitions {
        output.push_str(&format!("    {} → {}\n", from, targets.join(", ")));
    }
    let terminal = def.terminal_values();
    if !terminal.is_empty() {
        output.push_str(&format!("    terminal: {}\n", terminal.join(", ")));
    }
}

fn push_collection(
    output: &mut String,
    schema: &NomlSchema,
    name: &str,
    collection: &CollectionDef,
    depth: usize,
) {
    let indent = "  ".repeat(depth + 1);
    output.push_str(&format!(
        "{}📁 {} ({} fields)",
        indent,
        name,
        collection.field_count()
    ));
    if let Some(path) = &collection.path {
        output.push_str(&format!("  {}", path));
    }
    output.push('\n');
    if let Some(description) = &collection.description {
        output.push_str(&format!("{}   {}\n", indent, description));
    }

    push_fields(output, schema, &collection.fields, &format!("{}   ", indent));

    if let Some(keys) = &collection.keys {
        if let Some(primary) = &keys.primary {
            output.push_str(&format!("{}   PK {}\n", indent, primary));
        }
        for foreign in &keys.foreign {
            output.push_str(&format!(
                "{}   FK {} → {}\n",
                indent, foreign.field, foreign.references
            ));
        }
        for unique in &keys.unique {
            output.push_str(&format!("{}   UQ {}\n", indent, unique.field));
        }
        for composite in &keys.composite_unique {
            output.push_str(&format!("{}   UQ ({})\n", indent, composite.fields.join(", ")));
        }
    }

    for index in &collection.indexes {
        let fields: Vec<String> = index
            .resolved_fields()
            .iter()
            .map(|f| {
                let mut label = f.field.to_string();
                if let Some(order) = f.order.filter(|o| *o != SortOrder::Other) {
                    label.push_str(&format!(" {}", order.as_str()));
                }
                if f.array_contains {
                    label.push_str(" (array-contains)");
                }
                label
            })
            .collect();
        output.push_str(&format!(
            "{}   IDX {}({})\n",
            indent,
            index.name.as_deref().map(|n| format!("{} ", n)).unwrap_or_default(),
            fields.join(", ")
        ));
    }

    if let Some(security) = &collection.security {
        for (operation, rules) in security.operations() {
            output.push_str(&format!("{}   🔒 {}: {} rule(s)\n", indent, operation, rules.len()));
        }
    }
}

fn push_fields(
    output: &mut String,
    schema: &NomlSchema,
    fields: &IndexMap<String, FieldDef>,
    indent: &str,
) {
    for (name, field) in fields {
        let marker = if field.required { "*" } else { "" };
        output.push_str(&format!("{}{}{}: {}", indent, name, marker, field.type_display()));
        if field.nullable == Some(true) {
            output.push_str(" | null");
        }
        if let Some(sentinel) = field.default_sentinel() {
            output.push_str(&format!(" = {}", sentinel.as_str()));
        }
        if let Some(values) = schema.allowed_values(field) {
            output.push_str(&format!(" [{}]", values.join(", ")));
        }
        if let Some(from) = &field.denormalized_from {
            output.push_str(&format!(" ← {}", from.display_path()));
        }
        output.push('\n');

        if let Some(nested) = field.nested_fields() {
            push_fields(output, schema, nested, &format!("{}  ", indent));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_and_validate;

    #[test]
    fn test_text_output_lists_errors() {
        let outcome = parse_and_validate("version: '1'\ndatabase: mysql\ncollections: {}\n");
        let text = format_validation_text(&outcome);
        assert!(text.contains("collections: At least one collection is required"));
        assert!(text.contains("Warnings"));
        assert!(text.contains("Schema has 1 error(s)"));
    }

    #[test]
    fn test_json_report_shape() {
        let outcome = parse_and_validate("version: [\n");
        let json: serde_json::Value =
            serde_json::from_str(&format_report_json(&outcome).unwrap()).unwrap();
        assert!(json["schema"].is_null());
        assert!(json["parseError"].is_string());
        assert_eq!(json["validation"]["valid"], false);
        assert_eq!(json["validation"]["errors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_schema_summary() {
        let outcome = parse_and_validate(
            r#"
version: '1'
database: firestore
metadata: { name: Shop }
enums:
  Status: { values: [open, closed], transitions: { open: [closed] } }
collections:
  orders:
    fields:
      status: { type: Status, required: true }
      createdAt: { type: timestamp, default: serverTimestamp }
    subcollections:
      items:
        fields:
          sku: { type: string }
"#,
        );
        let schema = outcome.schema().unwrap().to_schema().unwrap();
        let summary = format_schema_summary(&schema);
        assert!(summary.starts_with("Shop\n"));
        assert!(summary.contains("status*: Status [open, closed]"));
        assert!(summary.contains("createdAt: timestamp = serverTimestamp"));
        assert!(summary.contains("terminal: closed"));
        assert!(summary.contains("    📁 items (1 fields)"));
    }

    #[test]
    fn test_summary_of_loosely_typed_document() {
        let outcome = parse_and_validate(
            r#"
version: '1'
database: firestore
collections:
  orders:
    description: 42
    fields:
      total: { type: number }
    indexes:
      - fields: [total]
        order: [DESC]
"#,
        );
        assert!(outcome.is_valid());
        let schema = outcome.schema().unwrap().to_schema().unwrap();
        let summary = format_schema_summary(&schema);
        assert!(summary.contains("     42\n"));
        assert!(summary.contains("IDX (total desc)"));
    }
}
