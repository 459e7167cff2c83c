//! Collection model

use super::field::FieldDef;
use super::keys::KeysDef;
use super::scalar::{deserialize_optional_string, value_to_string};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// Index sort order; read case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
    /// Anything other than `asc`/`desc` (or their long forms)
    Other,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::Other => "other",
        }
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match value_to_string(&raw).to_ascii_lowercase().as_str() {
            "asc" | "ascending" => SortOrder::Asc,
            "desc" | "descending" => SortOrder::Desc,
            _ => SortOrder::Other,
        })
    }
}

/// An index field, written bare (`createdAt`) or structured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexField {
    Name(String),
    #[serde(rename_all = "camelCase")]
    Detailed {
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order: Option<SortOrder>,
        #[serde(default)]
        array_contains: bool,
    },
}

impl IndexField {
    pub fn field_name(&self) -> &str {
        match self {
            IndexField::Name(name) => name,
            IndexField::Detailed { field, .. } => field,
        }
    }
}

/// An index field with its sort order resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIndexField<'a> {
    pub field: &'a str,
    pub order: Option<SortOrder>,
    pub array_contains: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<IndexField>,
    /// Legacy: sort orders paired by position with bare-string fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<SortOrder>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub query_example: Option<String>,
}

impl IndexDef {
    /// Fields with their sort order, applying the legacy `order` array to bare names
    pub fn resolved_fields(&self) -> Vec<ResolvedIndexField<'_>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(position, field)| match field {
                IndexField::Name(name) => ResolvedIndexField {
                    field: name,
                    order: self.order.get(position).copied(),
                    array_contains: false,
                },
                IndexField::Detailed {
                    field,
                    order,
                    array_contains,
                } => ResolvedIndexField {
                    field,
                    order: *order,
                    array_contains: *array_contains,
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub condition: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_fields: Vec<String>,
}

/// Per-operation access rules; documentation only
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecurityDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub read: Vec<SecurityRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<SecurityRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<SecurityRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<SecurityRule>,
}

impl SecurityDef {
    /// Rules grouped by operation name, skipping operations without rules
    pub fn operations(&self) -> Vec<(&'static str, &[SecurityRule])> {
        [
            ("read", self.read.as_slice()),
            ("create", self.create.as_slice()),
            ("update", self.update.as_slice()),
            ("delete", self.delete.as_slice()),
        ]
        .into_iter()
        .filter(|(_, rules)| !rules.is_empty())
        .collect()
    }
}

/// A named grouping of documents, optionally with nested subcollections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionDef {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Document path pattern such as `users/{userId}`; kept opaque
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<KeysDef>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub subcollections: IndexMap<String, CollectionDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
}

impl CollectionDef {
    /// Look up a field by dotted path, descending through nested map fields
    pub fn resolve_field(&self, path: &str) -> Option<&FieldDef> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.nested_fields()?.get(segment)?;
        }
        Some(current)
    }

    /// Number of fields, counting nested map fields
    pub fn field_count(&self) -> usize {
        fn count(fields: &IndexMap<String, FieldDef>) -> usize {
            fields
                .values()
                .map(|f| 1 + f.nested_fields().map(count).unwrap_or(0))
                .sum()
        }
        count(&self.fields)
    }
}
