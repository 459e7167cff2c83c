//! Scalar values and lenient string helpers
//!
//! NOML documents are hand-written YAML, so attributes that are conceptually
//! strings (`version`, `type`, enum values) frequently arrive as numbers or
//! booleans. These helpers accept any value and keep its canonical string form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::fmt;

/// A YAML scalar as it appears in enum values, transitions and inline enums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Returns the string payload if this scalar is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

/// Render a generic YAML value as a plain string
///
/// Scalars use their natural form; `null` becomes `"null"`; tagged values are
/// unwrapped; sequences and mappings fall back to compact YAML.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Deserialize an optional attribute that should be a string but may hold any value
///
/// Non-string values are rendered with [`value_to_string`], so a mistyped
/// descriptive attribute never fails the whole model.
pub(crate) fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| value_to_string(&v)))
}

/// Like [`deserialize_optional_string`], with null read as the empty string
pub(crate) fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_string(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display_matches_source_text() {
        assert_eq!(Scalar::Integer(3).to_string(), "3");
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Float(1.0).to_string(), "1");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::from("draft").to_string(), "draft");
    }

    #[test]
    fn test_value_to_string() {
        let value: Value = serde_yaml::from_str("42").unwrap();
        assert_eq!(value_to_string(&value), "42");
        assert_eq!(value_to_string(&Value::Null), "null");
        let value: Value = serde_yaml::from_str("[a, b]").unwrap();
        assert_eq!(value_to_string(&value), "- a\n- b");
    }

    #[derive(Debug, Deserialize)]
    struct Described {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        description: Option<String>,
    }

    #[test]
    fn test_optional_string_accepts_any_value() {
        let parse = |yaml: &str| serde_yaml::from_str::<Described>(yaml).unwrap().description;
        assert_eq!(parse("description: 42"), Some("42".to_string()));
        assert_eq!(parse("description: [a, b]"), Some("- a\n- b".to_string()));
        assert_eq!(parse("description: ~"), None);
        assert_eq!(parse("{}"), None);
    }
}
