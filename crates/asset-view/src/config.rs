//! View configuration
//!
//! Loaded from TOML or YAML; every field has a default so an empty file is
//! a valid configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use asset_model::IngestOptions;
use serde::{Deserialize, Serialize};

/// Documentation targets for empty-state messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsLinks {
    /// Linked from the "No configuration" state
    pub config_schema: String,
    /// Linked from the "No type data" state
    pub type_system: String,
    /// Linked from the "No metadata" state
    pub metadata: String,
}

impl Default for DocsLinks {
    fn default() -> Self {
        Self {
            config_schema: "https://docs.dagster.io/concepts/configuration/config-schema".to_string(),
            type_system: "https://docs.dagster.io/api/python#dagster.DagsterType".to_string(),
            metadata: "https://docs.dagster.io/concepts/metadata-tags/asset-metadata".to_string(),
        }
    }
}

const DEFAULT_NEIGHBOR_DISPLAY_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Configuration for building and rendering views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Neighbors shown per direction before truncating
    pub neighbor_display_limit: NonZeroUsize,
    /// Documentation links
    pub docs: DocsLinks,
    /// Conventions applied when ingesting fetched fragments
    pub ingest: IngestOptions,
}

impl ViewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With neighbor display limit
    #[inline]
    #[must_use]
    pub fn with_neighbor_display_limit(mut self, limit: NonZeroUsize) -> Self {
        self.neighbor_display_limit = limit;
        self
    }

    /// With documentation links
    #[inline]
    #[must_use]
    pub fn with_docs(mut self, docs: DocsLinks) -> Self {
        self.docs = docs;
        self
    }

    /// With ingestion conventions
    #[inline]
    #[must_use]
    pub fn with_ingest_options(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    /// Check invariants
    ///
    /// # Errors
    /// Returns error if an ingestion convention is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingest.any_type_sentinel.is_empty() {
            return Err(ConfigError::Invalid(
                "ingest.any_type_sentinel must not be empty".to_string(),
            ));
        }
        if self.ingest.hidden_job_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "ingest.hidden_job_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid or the result fails validation
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the result fails validation
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error on IO failure, unknown extension or invalid content
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        tracing::debug!(path = %path.display(), "loaded view config");
        Ok(config)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            neighbor_display_limit: DEFAULT_NEIGHBOR_DISPLAY_LIMIT,
            docs: DocsLinks::default(),
            ingest: IngestOptions::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the file
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File extension not recognised
    #[error("unsupported config format: '{0}' (expected toml, yaml or yml)")]
    UnsupportedFormat(String),

    /// Invalid TOML
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid YAML
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Parsed but violates an invariant
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_documents_are_defaults() {
        assert_eq!(ViewConfig::from_toml_str("").unwrap(), ViewConfig::default());
        assert_eq!(ViewConfig::from_yaml_str("").unwrap(), ViewConfig::default());
    }

    #[test]
    fn toml_overrides_nested_fields() {
        let config = ViewConfig::from_toml_str(
            r#"
            neighbor_display_limit = 3

            [ingest]
            any_type_sentinel = "Anything"
            "#,
        )
        .unwrap();
        assert_eq!(config.neighbor_display_limit.get(), 3);
        assert_eq!(config.ingest.any_type_sentinel, "Anything");
        assert_eq!(config.ingest.hidden_job_prefix, "__ASSET_JOB");
        assert_eq!(config.docs, DocsLinks::default());
    }

    #[test]
    fn yaml_overrides_docs() {
        let config = ViewConfig::from_yaml_str("docs:\n  metadata: https://example.com/meta\n").unwrap();
        assert_eq!(config.docs.metadata, "https://example.com/meta");
    }

    #[test]
    fn zero_limit_is_rejected() {
        let result = ViewConfig::from_toml_str("neighbor_display_limit = 0");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
        let result = ViewConfig::from_yaml_str("neighbor_display_limit: 0");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn blank_conventions_are_rejected() {
        let result = ViewConfig::from_toml_str("[ingest]\nany_type_sentinel = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("any_type_sentinel")));
        let result = ViewConfig::from_yaml_str("ingest:\n  hidden_job_prefix: \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("hidden_job_prefix")));
    }

    #[test]
    fn builder_methods() {
        let config = ViewConfig::new().with_neighbor_display_limit(NonZeroUsize::new(2).unwrap());
        assert_eq!(config.neighbor_display_limit.get(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_path_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "neighbor_display_limit: 4").unwrap();
        let config = ViewConfig::from_path(file.path()).unwrap();
        assert_eq!(config.neighbor_display_limit.get(), 4);

        let other = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let result = ViewConfig::from_path(other.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "json"));
    }

    #[test]
    fn from_path_missing_file() {
        let result = ViewConfig::from_path("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
