//! Definition metadata entries

use serde::{Deserialize, Serialize};

use crate::key::AssetKey;

/// Labeled metadata value attached to an asset definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Label shown in the first column
    pub label: String,
    /// Optional description of the entry
    pub description: Option<String>,
    /// Typed value
    pub value: MetadataValue,
}

impl MetadataEntry {
    /// Entry without description
    #[must_use]
    pub fn new(label: impl Into<String>, value: MetadataValue) -> Self {
        Self {
            label: label.into(),
            description: None,
            value,
        }
    }
}

/// Typed metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    Text(String),
    Markdown(String),
    Url(String),
    Path(String),
    Json(serde_json::Value),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Reference to another asset
    Asset(AssetKey),
    /// Reference to a job in the owning location
    Job(String),
    Notebook(String),
    PythonArtifact { module: String, name: String },
    /// Entry type without a typed rendering; only its type name is kept
    Unsupported { typename: String },
}

impl MetadataValue {
    /// Plain-text form used by table renderers
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Markdown(s) | Self::Url(s) | Self::Path(s) | Self::Notebook(s) => {
                s.clone()
            }
            Self::Job(name) => name.clone(),
            Self::Json(value) => value.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Null => "null".to_string(),
            Self::Asset(key) => key.display_name(),
            Self::PythonArtifact { module, name } => format!("{module}.{name}"),
            Self::Unsupported { typename } => format!("[{typename}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_per_variant() {
        assert_eq!(MetadataValue::Int(42).display_text(), "42");
        assert_eq!(MetadataValue::Bool(true).display_text(), "true");
        assert_eq!(MetadataValue::Null.display_text(), "null");
        assert_eq!(
            MetadataValue::Asset(AssetKey::from_segments(["a", "b"])).display_text(),
            "a / b"
        );
        assert_eq!(
            MetadataValue::PythonArtifact {
                module: "pkg.mod".into(),
                name: "fn".into()
            }
            .display_text(),
            "pkg.mod.fn"
        );
        assert_eq!(
            MetadataValue::Json(serde_json::json!({"rows": 3})).display_text(),
            r#"{"rows":3}"#
        );
    }
}
