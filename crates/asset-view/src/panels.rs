//! Panel types of the detail view
//!
//! Every panel is plain data. Panels that can be empty are wrapped in
//! [`Section`], which carries either content or an [`EmptyState`] so a
//! renderer never has to decide what "nothing" looks like.

use asset_model::{
    AssetKey, AutoMaterializePolicyType, ConfigType, LiveStatus, MetadataValue, TypeSummary,
};
use serde::Serialize;

use crate::links::LineageScope;

/// Message shown in place of an empty panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    /// User-facing message
    pub message: String,
    /// Documentation link, if the empty state explains a feature
    pub docs_link: Option<String>,
}

impl EmptyState {
    /// Empty state without a link
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            docs_link: None,
        }
    }

    /// Empty state with a documentation link
    #[must_use]
    pub fn with_docs(message: impl Into<String>, docs_link: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            docs_link: Some(docs_link.into()),
        }
    }
}

/// Panel body: content, or an explanation of why there is none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    /// Panel has something to show
    Content(T),
    /// Panel shows a message instead
    Empty(EmptyState),
}

impl<T> Section<T> {
    /// Content if present
    #[must_use]
    pub fn content(&self) -> Option<&T> {
        match self {
            Self::Content(content) => Some(content),
            Self::Empty(_) => None,
        }
    }

    /// Empty state if present
    #[must_use]
    pub fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            Self::Content(_) => None,
            Self::Empty(state) => Some(state),
        }
    }

    /// True for the empty state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Text with an optional link target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Visible text
    pub text: String,
    /// Relative or absolute URL; `None` renders unlinked
    pub href: Option<String>,
}

/// Ops or graph that compute the asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnderlyingOps {
    /// Graph-backed asset
    Graph { name: String },
    /// Single op whose name differs from the asset's
    Op { name: String },
    /// Several ops
    Ops { count: usize },
    /// Nothing worth pointing at
    Hidden,
}

/// Badges shown beside the asset name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotations {
    /// User-visible jobs that materialize the asset
    pub jobs: Vec<Link>,
    /// Ops or graph behind the asset
    pub underlying: UnderlyingOps,
    /// Asset is produced outside the orchestrator
    pub source_asset: bool,
    /// Asset group
    pub group_name: Option<String>,
    /// Compute kind tag
    pub compute_kind: Option<String>,
}

/// One upstream or downstream neighbor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborEntry {
    pub key: AssetKey,
    pub link: Link,
    pub status: LiveStatus,
    pub is_source: bool,
    pub compute_kind: Option<String>,
    pub description: Option<String>,
}

/// Upstream or downstream list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborSection {
    /// Direction
    pub scope: LineageScope,
    /// Section header, linked to the lineage view
    pub header: Link,
    /// Entries up to the display limit
    pub entries: Section<Vec<NeighborEntry>>,
    /// Neighbors after filtering, before truncation
    pub total: usize,
    /// Neighbors cut by the display limit
    pub overflow: usize,
}

/// Freshness policy panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshnessPanel {
    pub maximum_lag_minutes: u64,
    pub cron_schedule: Option<String>,
    pub cron_schedule_timezone: Option<String>,
    /// One-line summary
    pub summary: String,
}

/// Auto-materialize policy panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoMaterializePanel {
    pub policy_type: AutoMaterializePolicyType,
    pub max_materializations_per_minute: Option<u32>,
    /// One-line summary
    pub summary: String,
}

/// Row of the metadata table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRow {
    pub label: String,
    pub description: Option<String>,
    pub value: MetadataValue,
    /// Value as displayed, linked where the value points somewhere
    pub link: Link,
}

/// Config schema panel body
pub type ConfigPanel = Section<ConfigType>;

/// Type panel body
pub type TypePanel = Section<TypeSummary>;

/// Required resources panel body
pub type ResourcesPanel = Section<Vec<Link>>;

/// Metadata panel body
pub type MetadataPanel = Section<Vec<MetadataRow>>;
