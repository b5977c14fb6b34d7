//! Asset Model
//!
//! Identity and descriptor types for the asset detail view.
//!
//! # Core Concepts
//!
//! - [`AssetKey`]: Hierarchical, segment-wise compared asset identifier
//! - [`PartitionName`]: Opaque partition identifier
//! - [`FilterQuery`]: Case-insensitive free-text query
//! - [`AssetNodeDefinition`]: Typed descriptor consumed by the view
//! - [`ingest`]: The single boundary where fetched fragments become typed
//!
//! # Example
//!
//! ```rust
//! use asset_model::{ingest, AssetNodeFragment, ConfigSchema, IngestOptions};
//!
//! let fragment: AssetNodeFragment = serde_json::from_str(
//!     r#"{"assetKey": {"path": ["warehouse", "orders"]},
//!         "configField": {"configType": {"key": "Any"}}}"#,
//! ).unwrap();
//! let definition = ingest(fragment, &IngestOptions::default()).unwrap();
//! assert_eq!(definition.config, ConfigSchema::Untyped);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod definition;
mod hash;
pub mod ingest;
mod key;
mod live;
mod metadata;
mod partition;
mod query;

pub use definition::{
    AssetNodeDefinition, AutoMaterializePolicy, AutoMaterializePolicyType, ConfigField,
    ConfigSchema, ConfigType, FreshnessPolicy, JobRef, NeighborAsset, RepositoryRef, TypeInfo,
    TypeSummary,
};
pub use hash::{ContentAddressed, ContentHash};
pub use ingest::{
    ingest, ingest_bundle, ingest_bundle_json, AssetNodeFragment, AssetViewBundle,
    IngestError, IngestOptions, IngestedBundle,
};
pub use key::{AssetKey, AssetKeyError};
pub use live::{status_of, LiveDataMap, LiveStatus};
pub use metadata::{MetadataEntry, MetadataValue};
pub use partition::PartitionName;
pub use query::FilterQuery;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
