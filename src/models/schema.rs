//! Root NOML schema model

use super::collection::CollectionDef;
use super::enums::EnumDef;
use super::field::{FieldDef, FieldKind};
use super::scalar::{deserialize_lenient_string, deserialize_optional_string};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// The only database whose features are fully described
pub const SUPPORTED_DATABASE: &str = "firestore";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NomlMetadata {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,
}

/// Typed view of a NOML document
///
/// Built leniently: structurally required attributes (`version`, `database`,
/// `collections`, field types) may be missing here. Whether they are present
/// is reported by the structural validator, not by this conversion.
///
/// # Example
///
/// ```rust
/// use noml_sdk::models::NomlSchema;
///
/// let schema: NomlSchema = serde_yaml::from_str(
///     "version: '0.1'\ndatabase: firestore\ncollections:\n  users:\n    fields:\n      email: { type: string }\n",
/// ).unwrap();
/// assert_eq!(schema.collections["users"].fields.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NomlSchema {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub database: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NomlMetadata>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub enums: IndexMap<String, EnumDef>,
    #[serde(default)]
    pub collections: IndexMap<String, CollectionDef>,
    /// Cloud Functions; accepted and never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
}

impl NomlSchema {
    pub fn is_supported_database(&self) -> bool {
        self.database.as_deref() == Some(SUPPORTED_DATABASE)
    }

    /// Display name: `metadata.name`, else "Schema"
    pub fn display_name(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Schema")
    }

    /// Description from metadata, falling back to the root `description`
    pub fn display_description(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.description.as_deref())
            .or(self.description.as_deref())
    }

    /// Parse `updatedAt` as an RFC 3339 timestamp or a `YYYY-MM-DD` date
    pub fn updated_at_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.updated_at.as_deref()?.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// The named enum a field's type refers to, if any
    pub fn enum_for(&self, field: &FieldDef) -> Option<&EnumDef> {
        match &field.kind {
            FieldKind::Named(name) => self.enums.get(name),
            _ => None,
        }
    }

    /// Allowed values for a field: from its named enum, else from the inline `validation.enum`
    pub fn allowed_values(&self, field: &FieldDef) -> Option<Vec<String>> {
        if let Some(def) = self.enum_for(field) {
            return Some(def.canonical_values());
        }
        field
            .validation
            .as_ref()
            .filter(|v| !v.allowed_values.is_empty())
            .map(|v| v.allowed_values.iter().map(|s| s.to_string()).collect())
    }

    /// Every collection with its dot-path, depth-first in declaration order
    ///
    /// Paths follow diagnostic addressing: `collections.posts.subcollections.comments`.
    pub fn collections_tree(&self) -> Vec<(String, &str, &CollectionDef)> {
        let mut tree = Vec::new();
        let mut stack: Vec<(String, &str, &CollectionDef)> = self
            .collections
            .iter()
            .rev()
            .map(|(name, c)| (format!("collections.{}", name), name.as_str(), c))
            .collect();

        while let Some((path, name, collection)) = stack.pop() {
            for (sub_name, sub) in collection.subcollections.iter().rev() {
                stack.push((
                    format!("{}.subcollections.{}", path, sub_name),
                    sub_name.as_str(),
                    sub,
                ));
            }
            tree.push((path, name, collection));
        }
        tree
    }

    /// Find a collection by name anywhere in the tree; the shallowest match wins
    pub fn find_collection(&self, name: &str) -> Option<&CollectionDef> {
        if let Some(collection) = self.collections.get(name) {
            return Some(collection);
        }
        self.collections_tree()
            .into_iter()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, c)| c)
    }
}
