//! Asset View
//!
//! Builds the detail view of one asset definition: annotations, neighbor
//! lists, required resources, config, type and metadata panels, plus the
//! policy panels that only appear when the definition carries them.
//!
//! # Example
//!
//! ```rust
//! use asset_model::{AssetKey, AssetNodeDefinition, LiveDataMap};
//! use asset_view::{AssetNodeDefinitionView, ViewConfig, ViewInputs};
//!
//! let def = AssetNodeDefinition::new(AssetKey::from_segments(["warehouse", "orders"]));
//! let live = LiveDataMap::new();
//! let view = AssetNodeDefinitionView::build(
//!     &ViewInputs::new(&def, &[], &[], &live),
//!     &ViewConfig::default(),
//! );
//! assert_eq!(
//!     view.required_resources.empty_state().map(|s| s.message.as_str()),
//!     Some("No required resources"),
//! );
//! ```

#![warn(missing_docs)]

pub mod collate;
pub mod config;
pub mod links;
pub mod panels;
pub mod render;
pub mod view;

// Re-exports
pub use config::{ConfigError, DocsLinks, ViewConfig};
pub use links::{
    asset_path, job_path, lineage_path, resource_path, LineageScope, RepoAddress,
    DEFAULT_REPOSITORY_NAME,
};
pub use panels::{
    Annotations, AutoMaterializePanel, EmptyState, FreshnessPanel, Link, MetadataRow,
    NeighborEntry, NeighborSection, Section, UnderlyingOps,
};
pub use render::{markdown_to_plain, render_text, TextReport};
pub use view::{AssetNodeDefinitionView, ViewInputs};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building views
    pub use crate::{render_text, AssetNodeDefinitionView, RepoAddress, Section, ViewConfig, ViewInputs};
    pub use asset_model::{AssetKey, AssetNodeDefinition, LiveDataMap, NeighborAsset};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
