//! Asset keys
//!
//! Provides [`AssetKey`], the hierarchical identifier of an asset within a
//! workspace.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hierarchical asset identifier
///
/// An ordered list of path segments. Equality and ordering are
/// segment-wise, so `["a", "b/c"]` and `["a", "b", "c"]` are different keys
/// even though they may look alike once joined.
///
/// # Examples
/// - `["warehouse", "orders"]` → `warehouse / orders`
/// - `["raw_events"]` → `raw_events`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(Vec<String>);

impl AssetKey {
    /// Create key from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or a segment is empty
    pub fn new(segments: Vec<String>) -> Result<Self, AssetKeyError> {
        if segments.is_empty() {
            return Err(AssetKeyError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(AssetKeyError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Create key from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Create key from string-like segments, skipping validation
    ///
    /// Intended for literals in code and tests.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the key has no segments
    ///
    /// Only reachable through deserialization of malformed input.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment, the asset's short name
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Key prefix (all segments except the last)
    #[must_use]
    pub fn prefix(&self) -> &[String] {
        match self.0.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Join segments with custom separator
    #[inline]
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// Human-readable name (`a / b / c`)
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> String {
        self.join(" / ")
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for AssetKey {
    type Err = AssetKeyError;

    /// Parse a `/`-separated key. Whitespace around segments is trimmed so
    /// the display form round-trips.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AssetKeyError::Empty);
        }
        let segments = s
            .split('/')
            .map(|seg| {
                let seg = seg.trim();
                if seg.is_empty() {
                    Err(AssetKeyError::EmptySegment)
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(segments))
    }
}

impl TryFrom<Vec<String>> for AssetKey {
    type Error = AssetKeyError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

/// Errors related to asset keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetKeyError {
    /// Key without segments
    #[error("asset key must have at least one segment")]
    Empty,

    /// Empty segment in key
    #[error("asset key contains empty segment")]
    EmptySegment,
}
