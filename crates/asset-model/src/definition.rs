//! Typed asset descriptors
//!
//! These are the shapes the view layer consumes. They are produced once by
//! [`crate::ingest`] and never re-inspected for sentinel strings afterwards.

use serde::{Deserialize, Serialize};

use crate::key::AssetKey;
use crate::metadata::MetadataEntry;

/// Everything the detail view knows about one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetNodeDefinition {
    /// Asset identity
    pub key: AssetKey,
    /// Free-form markdown description
    pub description: Option<String>,
    /// Code version of the producing op
    pub op_version: Option<String>,
    /// Asset group
    pub group_name: Option<String>,
    /// Compute kind tag (`python`, `dbt`, ...)
    pub compute_kind: Option<String>,
    /// Jobs that materialize this asset
    pub jobs: Vec<JobRef>,
    /// Auto-materialize policy
    pub auto_materialize_policy: Option<AutoMaterializePolicy>,
    /// Freshness policy
    pub freshness_policy: Option<FreshnessPolicy>,
    /// Human description of the partition definition
    pub partition_description: Option<String>,
    /// Owning repository
    pub repository: Option<RepositoryRef>,
    /// Resource keys the asset requires
    pub required_resources: Vec<String>,
    /// Config schema of the producing op
    pub config: ConfigSchema,
    /// Output type of the producing op
    pub output_type: TypeInfo,
    /// Definition metadata
    pub metadata: Vec<MetadataEntry>,
    /// Ops backing the asset
    pub op_names: Vec<String>,
    /// Graph backing the asset, for graph-backed assets
    pub graph_name: Option<String>,
    /// Externally produced, no materialization function
    pub is_source: bool,
}

impl AssetNodeDefinition {
    /// Minimal definition for `key`; every optional field is absent
    #[must_use]
    pub fn new(key: AssetKey) -> Self {
        Self {
            key,
            description: None,
            op_version: None,
            group_name: None,
            compute_kind: None,
            jobs: Vec::new(),
            auto_materialize_policy: None,
            freshness_policy: None,
            partition_description: None,
            repository: None,
            required_resources: Vec::new(),
            config: ConfigSchema::Untyped,
            output_type: TypeInfo::Untyped,
            metadata: Vec::new(),
            op_names: Vec::new(),
            graph_name: None,
            is_source: false,
        }
    }

    /// Jobs shown to users (hidden asset-group jobs excluded)
    pub fn visible_jobs(&self) -> impl Iterator<Item = &JobRef> {
        self.jobs.iter().filter(|job| !job.hidden)
    }

    /// True when the asset is partitioned
    #[inline]
    #[must_use]
    pub fn is_partitioned(&self) -> bool {
        self.partition_description.is_some()
    }
}

/// Job that can materialize an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRef {
    /// Job name
    pub name: String,
    /// Synthetic asset-group job, never linked in the UI
    pub hidden: bool,
}

impl JobRef {
    /// User-defined job
    #[must_use]
    pub fn visible(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
        }
    }

    /// Synthetic job produced by the orchestrator
    #[must_use]
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: true,
        }
    }
}

/// Kind of auto-materialize policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoMaterializePolicyType {
    /// Materialize as soon as upstream data changes
    Eager,
    /// Materialize only when needed to meet downstream freshness
    Lazy,
}

/// Rule that triggers automatic recomputation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoMaterializePolicy {
    /// Policy kind
    pub policy_type: AutoMaterializePolicyType,
    /// Cap on materializations per minute, if any
    pub max_materializations_per_minute: Option<u32>,
}

/// Acceptable staleness for an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Maximum lag in minutes
    pub maximum_lag_minutes: u64,
    /// Cron schedule the lag is evaluated against
    pub cron_schedule: Option<String>,
    /// Timezone of the cron schedule
    pub cron_schedule_timezone: Option<String>,
}

/// Repository as fetched, before address resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Opaque repository id
    pub id: String,
    /// Repository name
    pub name: String,
    /// Name of the code location hosting the repository
    pub location_name: String,
}

/// Config schema of the producing op
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigSchema {
    /// A concrete schema worth showing
    Typed(ConfigType),
    /// No schema, or the permissive "any" type
    Untyped,
}

impl ConfigSchema {
    /// Schema if typed
    #[must_use]
    pub fn typed(&self) -> Option<&ConfigType> {
        match self {
            Self::Typed(ty) => Some(ty),
            Self::Untyped => None,
        }
    }
}

/// A concrete config type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigType {
    /// Type key as reported by the schema
    pub key: String,
    /// Description of the type
    pub description: Option<String>,
    /// Fields, for shaped types
    pub fields: Vec<ConfigField>,
}

/// One field of a shaped config type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Field name
    pub name: String,
    /// Type key of the field
    pub type_key: String,
    /// Whether the field must be supplied
    pub is_required: bool,
    /// Field description
    pub description: Option<String>,
}

/// Output type of the producing op
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeInfo {
    /// A concrete type worth showing
    Typed(TypeSummary),
    /// No type, or the permissive "any" type
    Untyped,
}

impl TypeInfo {
    /// Summary if typed
    #[must_use]
    pub fn typed(&self) -> Option<&TypeSummary> {
        match self {
            Self::Typed(summary) => Some(summary),
            Self::Untyped => None,
        }
    }
}

/// Display information for a concrete type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    /// Name shown to users
    pub display_name: String,
    /// Type description (markdown)
    pub description: Option<String>,
}

/// Neighbor of an asset in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborAsset {
    /// Neighbor identity
    pub key: AssetKey,
    /// Neighbor description
    #[serde(default)]
    pub description: Option<String>,
    /// Compute kind tag
    #[serde(default)]
    pub compute_kind: Option<String>,
    /// Externally produced neighbor
    #[serde(default)]
    pub is_source: bool,
}

impl NeighborAsset {
    /// Neighbor with only a key
    #[must_use]
    pub fn new(key: AssetKey) -> Self {
        Self {
            key,
            description: None,
            compute_kind: None,
            is_source: false,
        }
    }
}
