//! Free-text filter queries

use std::fmt::{self, Display, Formatter};

/// Case-insensitive substring query typed by a user
///
/// The needle is case-folded once at construction. An empty or absent
/// query is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterQuery {
    raw: String,
    needle: String,
}

impl FilterQuery {
    /// Create query from user input
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Create query from optional input; `None` behaves like `""`
    #[must_use]
    pub fn from_option(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }

    /// The identity query
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Query as typed
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Case-folded needle
    #[inline]
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// True when the query matches everything
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring test against one haystack
    #[must_use]
    pub fn matches(&self, haystack: &str) -> bool {
        self.is_identity() || haystack.to_lowercase().contains(&self.needle)
    }
}

impl Display for FilterQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FilterQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Option<&str>> for FilterQuery {
    fn from(raw: Option<&str>) -> Self {
        Self::from_option(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_query_equals_empty_query() {
        assert_eq!(FilterQuery::from_option(None), FilterQuery::new(""));
        assert!(FilterQuery::from_option(None).is_identity());
    }

    #[test]
    fn query_is_case_insensitive() {
        let q = FilterQuery::new("OrD");
        assert_eq!(q.needle(), "ord");
        assert_eq!(q.raw(), "OrD");
        assert!(q.matches("ORDERS"));
        assert!(q.matches("sales_orders"));
        assert!(!q.matches("customers"));
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let q = FilterQuery::new(" ");
        assert!(!q.is_identity());
        assert!(!q.matches("no_spaces"));
        assert!(q.matches("has space"));
    }
}
