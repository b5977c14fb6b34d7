//! Substring filters
//!
//! Both filters keep the original order and return the input itself (as
//! [`Cow::Borrowed`]) for the identity query, so callers that cache by
//! reference see no change.

use std::borrow::Cow;

use asset_model::{AssetKey, FilterQuery, PartitionName};

/// Items a [`FilterQuery`] can be tested against
///
/// Every implementation defers to [`FilterQuery::matches`] so there is a
/// single matching rule.
pub trait Searchable {
    /// True if the item matches `query`
    fn matches_query(&self, query: &FilterQuery) -> bool;
}

impl Searchable for AssetKey {
    /// Any segment may match.
    fn matches_query(&self, query: &FilterQuery) -> bool {
        self.iter().any(|segment| query.matches(segment))
    }
}

impl Searchable for PartitionName {
    fn matches_query(&self, query: &FilterQuery) -> bool {
        query.matches(self.as_str())
    }
}

impl Searchable for String {
    fn matches_query(&self, query: &FilterQuery) -> bool {
        query.matches(self)
    }
}

/// Filter any searchable collection
pub fn filter_items<'a, T>(items: &'a [T], query: &FilterQuery) -> Cow<'a, [T]>
where
    T: Searchable + Clone,
{
    if query.is_identity() {
        return Cow::Borrowed(items);
    }
    Cow::Owned(
        items
            .iter()
            .filter(|item| item.matches_query(query))
            .cloned()
            .collect(),
    )
}

/// Keys with at least one segment containing `query`, case-insensitively
///
/// # Examples
/// ```
/// use asset_filter::filter_asset_keys;
/// use asset_model::AssetKey;
///
/// let keys = vec![
///     AssetKey::from_segments(["a", "b"]),
///     AssetKey::from_segments(["c", "D"]),
/// ];
/// let found = filter_asset_keys(&keys, "d");
/// assert_eq!(&*found, &[AssetKey::from_segments(["c", "D"])]);
/// ```
pub fn filter_asset_keys<'a>(
    keys: &'a [AssetKey],
    query: impl Into<FilterQuery>,
) -> Cow<'a, [AssetKey]> {
    filter_items(keys, &query.into())
}

/// Partition names containing `query`, case-insensitively
///
/// Works over anything string-like so callers can pass plain `String`s or
/// [`PartitionName`]s.
pub fn filter_partition_names<'a, S>(names: &'a [S], query: impl Into<FilterQuery>) -> Cow<'a, [S]>
where
    S: AsRef<str> + Clone,
{
    let query = query.into();
    if query.is_identity() {
        return Cow::Borrowed(names);
    }
    Cow::Owned(
        names
            .iter()
            .filter(|name| query.matches(name.as_ref()))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys() -> Vec<AssetKey> {
        vec![
            AssetKey::from_segments(["a", "b"]),
            AssetKey::from_segments(["c", "D"]),
        ]
    }

    #[test]
    fn segment_match_is_case_insensitive() {
        let keys = keys();
        assert_eq!(
            filter_asset_keys(&keys, "d").into_owned(),
            vec![AssetKey::from_segments(["c", "D"])]
        );
        assert_eq!(
            filter_asset_keys(&keys, "B").into_owned(),
            vec![AssetKey::from_segments(["a", "b"])]
        );
    }

    #[test]
    fn match_is_within_a_segment() {
        // "a / b" as display text contains "a /", but no single segment does.
        let keys = keys();
        assert!(filter_asset_keys(&keys, "a /").is_empty());
        assert!(filter_asset_keys(&keys, "ab").is_empty());
    }

    #[test]
    fn empty_query_borrows_input() {
        let keys = keys();
        let result = filter_asset_keys(&keys, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ptr(), keys.as_ptr()));
    }

    #[test]
    fn absent_query_borrows_input() {
        let keys = keys();
        let result = filter_asset_keys(&keys, None::<&str>);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn partitions_keep_order() {
        let names = vec!["2024-01", "2024-02", "2023-12"];
        assert_eq!(
            filter_partition_names(&names, "2024").into_owned(),
            vec!["2024-01", "2024-02"]
        );
    }

    #[test]
    fn partitions_match_whole_name() {
        let names = vec![PartitionName::new("US-East|2024"), PartitionName::new("eu-west|2024")];
        assert_eq!(
            filter_partition_names(&names, "east|20").into_owned(),
            vec![PartitionName::new("US-East|2024")]
        );
    }

    #[test]
    fn partitions_empty_query_borrows() {
        let names = vec!["x".to_string()];
        assert!(matches!(filter_partition_names(&names, ""), Cow::Borrowed(_)));
    }

    #[test]
    fn partition_filter_agrees_with_searchable_rule() {
        let names = vec!["Daily-2024".to_string(), "weekly-2023".to_string()];
        let query = FilterQuery::new("DAILY");
        let via_names = filter_partition_names(&names, query.clone()).into_owned();
        let via_items = filter_items(&names, &query).into_owned();
        assert_eq!(via_names, via_items);
        assert_eq!(via_names, vec!["Daily-2024".to_string()]);
    }

    #[test]
    fn no_match_yields_empty() {
        let names = vec!["2024-01".to_string()];
        assert!(filter_partition_names(&names, "1999").is_empty());
    }
}
