//! Asset Filters
//!
//! Case-insensitive substring filters over asset keys and partition names.
//!
//! # Overview
//!
//! - [`filter_asset_keys`] / [`filter_partition_names`]: pure, order
//!   preserving, identity on the empty query
//! - [`MemoFilter`]: per-call-site memo keyed on input identity
//! - [`FilterCache`]: shared cache keyed on input content
//!
//! # Example
//!
//! ```rust
//! use asset_filter::filter_partition_names;
//!
//! let names = ["2024-01", "2024-02", "2023-12"];
//! let found = filter_partition_names(&names, "2024");
//! assert_eq!(&*found, &["2024-01", "2024-02"]);
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod filter;
pub mod memo;

// Re-exports
pub use cache::{CacheStats, FilterCache};
pub use filter::{filter_asset_keys, filter_items, filter_partition_names, Searchable};
pub use memo::MemoFilter;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for filtering
    pub use crate::{filter_asset_keys, filter_partition_names, FilterCache, MemoFilter, Searchable};
    pub use asset_model::FilterQuery;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
