//! Key declarations for a collection
//!
//! Keys are descriptive metadata. They are never enforced against the data,
//! and only cross-checked against the schema when reference checks are enabled.

use super::scalar::deserialize_optional_string;
use serde::{Deserialize, Serialize};

/// Action taken on the referencing document when the referenced one is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnDelete {
    Cascade,
    Restrict,
    SetNull,
    #[serde(other)]
    Other,
}

/// Foreign key: `field` references `collection.field`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDef {
    pub field: String,
    /// Target in `collection.field` form
    pub references: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDelete>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub is_array: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl ForeignKeyDef {
    /// Split `references` into `(collection, field)` on the first dot
    pub fn target(&self) -> Option<(&str, &str)> {
        split_reference(&self.references)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueKeyDef {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_by: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeUniqueKeyDef {
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysDef {
    /// Name of the field acting as document identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign: Vec<ForeignKeyDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<UniqueKeyDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_unique: Vec<CompositeUniqueKeyDef>,
}

/// Split a `collection.field` reference; the field part may itself be dotted
pub fn split_reference(reference: &str) -> Option<(&str, &str)> {
    let (collection, field) = reference.split_once('.')?;
    if collection.is_empty() || field.is_empty() {
        return None;
    }
    Some((collection, field))
}
