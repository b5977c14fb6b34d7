//! Partition names

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Name of one partition of a partitioned asset
///
/// Opaque to this crate. Uniqueness is scoped to the owning asset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionName(String);

impl PartitionName {
    /// Wrap a partition name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PartitionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartitionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartitionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PartitionName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
