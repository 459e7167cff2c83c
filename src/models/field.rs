//! Field model
//!
//! A field is read through one of several overlapping shapes depending on its
//! `type`: reference fields carry a `target`, arrays carry `items`, maps may
//! nest further `fields`. The shapes are resolved once, when the field is
//! deserialized, into [`FieldKind`].

use super::scalar::{Scalar, deserialize_optional_string};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

/// The fixed set of Firestore value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirestoreType {
    String,
    Number,
    Boolean,
    Timestamp,
    Geopoint,
    Reference,
    Array,
    Map,
    Null,
}

impl FirestoreType {
    pub const ALL: [FirestoreType; 9] = [
        FirestoreType::String,
        FirestoreType::Number,
        FirestoreType::Boolean,
        FirestoreType::Timestamp,
        FirestoreType::Geopoint,
        FirestoreType::Reference,
        FirestoreType::Array,
        FirestoreType::Map,
        FirestoreType::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FirestoreType::String => "string",
            FirestoreType::Number => "number",
            FirestoreType::Boolean => "boolean",
            FirestoreType::Timestamp => "timestamp",
            FirestoreType::Geopoint => "geopoint",
            FirestoreType::Reference => "reference",
            FirestoreType::Array => "array",
            FirestoreType::Map => "map",
            FirestoreType::Null => "null",
        }
    }
}

impl fmt::Display for FirestoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirestoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FirestoreType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown Firestore type: {}", s))
    }
}

/// Array element type, written either bare (`items: string`) or as `items: { type: string }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrayItems {
    Name(String),
    Typed {
        #[serde(rename = "type")]
        item_type: String,
    },
}

impl ArrayItems {
    pub fn type_name(&self) -> &str {
        match self {
            ArrayItems::Name(name) => name,
            ArrayItems::Typed { item_type } => item_type,
        }
    }
}

/// What a field is, keyed by its `type`
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// string, number, boolean, timestamp, geopoint or null
    Primitive(FirestoreType),
    Reference { target: Option<String> },
    Array { items: Option<ArrayItems> },
    Map { fields: IndexMap<String, FieldDef> },
    /// Any other type name; usually the name of a declared enum
    Named(String),
    /// No `type` was given
    Untyped,
}

impl FieldKind {
    /// The `type` string as written in the document
    pub fn type_name(&self) -> Option<&str> {
        match self {
            FieldKind::Primitive(t) => Some(t.as_str()),
            FieldKind::Reference { .. } => Some(FirestoreType::Reference.as_str()),
            FieldKind::Array { .. } => Some(FirestoreType::Array.as_str()),
            FieldKind::Map { .. } => Some(FirestoreType::Map.as_str()),
            FieldKind::Named(name) => Some(name),
            FieldKind::Untyped => None,
        }
    }

    fn resolve(
        type_name: Option<String>,
        target: Option<String>,
        items: Option<ArrayItems>,
        fields: Option<IndexMap<String, FieldDef>>,
    ) -> Self {
        let Some(type_name) = type_name.filter(|t| !t.is_empty()) else {
            return FieldKind::Untyped;
        };
        match type_name.parse::<FirestoreType>() {
            Ok(FirestoreType::Reference) => FieldKind::Reference { target },
            Ok(FirestoreType::Array) => FieldKind::Array { items },
            Ok(FirestoreType::Map) => FieldKind::Map {
                fields: fields.unwrap_or_default(),
            },
            Ok(primitive) => FieldKind::Primitive(primitive),
            Err(_) => FieldKind::Named(type_name),
        }
    }
}

/// Value constraints attached to a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// e.g. `email`, `url`, `uuid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Deprecated inline enum; named enums supersede it
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<Scalar>,
}

impl FieldValidation {
    /// Label/value pairs for every constraint that is set, in a stable order
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut items = Vec::new();
        if let Some(min) = self.min {
            items.push(("min", min.to_string()));
        }
        if let Some(max) = self.max {
            items.push(("max", max.to_string()));
        }
        if let Some(min_length) = self.min_length {
            items.push(("minLength", min_length.to_string()));
        }
        if let Some(max_length) = self.max_length {
            items.push(("maxLength", max_length.to_string()));
        }
        if let Some(min_items) = self.min_items {
            items.push(("minItems", min_items.to_string()));
        }
        if let Some(max_items) = self.max_items {
            items.push(("maxItems", max_items.to_string()));
        }
        if let Some(format) = &self.format {
            items.push(("format", format.clone()));
        }
        if let Some(pattern) = &self.pattern {
            items.push(("pattern", pattern.clone()));
        }
        if !self.allowed_values.is_empty() {
            let values: Vec<String> = self.allowed_values.iter().map(|v| v.to_string()).collect();
            items.push(("enum", format!("[{}]", values.join(", "))));
        }
        items
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenormalizationTarget {
    pub collection: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Where copies of this field are maintained
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenormalizationDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<DenormalizationTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenormalizedSource {
    pub collection: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Origin of a denormalized copy: `"collection.field"` or `{ collection, field, key? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DenormalizedFrom {
    Path(String),
    Source(DenormalizedSource),
}

impl DenormalizedFrom {
    /// `(collection, field)`, or `None` for a bare path without a dot
    pub fn target(&self) -> Option<(&str, &str)> {
        match self {
            DenormalizedFrom::Path(path) => super::keys::split_reference(path),
            DenormalizedFrom::Source(source) => {
                Some((source.collection.as_str(), source.field.as_str()))
            }
        }
    }

    /// Display form, always `collection.field`
    pub fn display_path(&self) -> String {
        match self {
            DenormalizedFrom::Path(path) => path.clone(),
            DenormalizedFrom::Source(source) => format!("{}.{}", source.collection, source.field),
        }
    }
}

/// String defaults with a meaning defined by code generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSentinel {
    ServerTimestamp,
    AutoId,
}

impl DefaultSentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultSentinel::ServerTimestamp => "serverTimestamp",
            DefaultSentinel::AutoId => "autoId",
        }
    }
}

/// A named, typed attribute of a collection or nested map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct FieldDef {
    pub kind: FieldKind,
    pub description: Option<String>,
    pub required: bool,
    /// Explicit null allowed; independent of `required`
    pub nullable: Option<bool>,
    pub default: Option<Value>,
    pub example: Option<Value>,
    /// e.g. `documentId`
    pub source: Option<String>,
    pub immutable: bool,
    pub auto_update: bool,
    /// Normalized from `validation`, falling back to the legacy `constraints`
    pub validation: Option<FieldValidation>,
    pub security: Option<Value>,
    pub denormalization: Option<DenormalizationDef>,
    pub denormalized_from: Option<DenormalizedFrom>,
    pub computed: Option<Value>,
}

impl FieldDef {
    /// Create a field of the given kind with every other attribute unset
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            description: None,
            required: false,
            nullable: None,
            default: None,
            example: None,
            source: None,
            immutable: false,
            auto_update: false,
            validation: None,
            security: None,
            denormalization: None,
            denormalized_from: None,
            computed: None,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.kind.type_name()
    }

    /// Nested fields of a `map` field
    pub fn nested_fields(&self) -> Option<&IndexMap<String, FieldDef>> {
        match &self.kind {
            FieldKind::Map { fields } => Some(fields),
            _ => None,
        }
    }

    /// Short type label: `ref → users`, `array<string>`, `map{3}`, or the type name
    pub fn type_display(&self) -> String {
        match &self.kind {
            FieldKind::Reference {
                target: Some(target),
            } => format!("ref → {}", target),
            FieldKind::Array { items: Some(items) } => format!("array<{}>", items.type_name()),
            FieldKind::Map { fields } if !fields.is_empty() => format!("map{{{}}}", fields.len()),
            FieldKind::Untyped => "untyped".to_string(),
            kind => kind.type_name().unwrap_or_default().to_string(),
        }
    }

    /// Recognize the `serverTimestamp` / `autoId` defaults
    pub fn default_sentinel(&self) -> Option<DefaultSentinel> {
        match self.default.as_ref()?.as_str()? {
            "serverTimestamp" => Some(DefaultSentinel::ServerTimestamp),
            "autoId" => Some(DefaultSentinel::AutoId),
            _ => None,
        }
    }
}

/// On-the-wire field shape: every key a field may carry, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    field_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    immutable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auto_update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<FieldValidation>,
    #[serde(default, skip_serializing)]
    constraints: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    security: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    denormalization: Option<DenormalizationDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    denormalized_from: Option<DenormalizedFrom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    computed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<ArrayItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<IndexMap<String, FieldDef>>,
}

impl From<RawField> for FieldDef {
    fn from(raw: RawField) -> Self {
        Self {
            kind: FieldKind::resolve(raw.field_type, raw.target, raw.items, raw.fields),
            description: raw.description,
            required: raw.required.unwrap_or(false),
            nullable: raw.nullable,
            default: raw.default,
            example: raw.example,
            source: raw.source,
            immutable: raw.immutable.unwrap_or(false),
            auto_update: raw.auto_update.unwrap_or(false),
            validation: raw.validation.or(raw.constraints),
            security: raw.security,
            denormalization: raw.denormalization,
            denormalized_from: raw.denormalized_from,
            computed: raw.computed,
        }
    }
}

impl From<FieldDef> for RawField {
    fn from(field: FieldDef) -> Self {
        let mut raw = RawField {
            field_type: field.kind.type_name().map(str::to_string),
            description: field.description,
            required: field.required.then_some(true),
            nullable: field.nullable,
            default: field.default,
            example: field.example,
            source: field.source,
            immutable: field.immutable.then_some(true),
            auto_update: field.auto_update.then_some(true),
            validation: field.validation,
            constraints: None,
            security: field.security,
            denormalization: field.denormalization,
            denormalized_from: field.denormalized_from,
            computed: field.computed,
            ..RawField::default()
        };
        match field.kind {
            FieldKind::Reference { target } => raw.target = target,
            FieldKind::Array { items } => raw.items = items,
            FieldKind::Map { fields } if !fields.is_empty() => raw.fields = Some(fields),
            _ => {}
        }
        raw
    }
}
