use std::borrow::Cow;
use std::sync::Arc;

use asset_filter::{filter_asset_keys, filter_partition_names, MemoFilter};
use asset_model::{AssetKey, FilterQuery};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{1,6}"
}

fn asset_keys() -> impl Strategy<Value = Vec<AssetKey>> {
    proptest::collection::vec(
        proptest::collection::vec(segment(), 1..4).prop_map(|segments| AssetKey::from_segments(segments)),
        0..20,
    )
}

/// True if `sub` appears in `full` in the same relative order.
fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|item| rest.any(|candidate| candidate == item))
}

proptest! {
    #[test]
    fn prop_asset_key_filter_is_ordered_subsequence(
        keys in asset_keys(),
        query in "[a-zA-Z]{0,3}",
    ) {
        let result = filter_asset_keys(&keys, query.as_str());
        prop_assert!(is_subsequence(&*result, &keys[..]));
    }

    #[test]
    fn prop_asset_key_filter_keeps_exactly_matches(
        keys in asset_keys(),
        query in "[a-zA-Z]{1,3}",
    ) {
        let needle = query.to_lowercase();
        let result = filter_asset_keys(&keys, query.as_str());
        let expected: Vec<AssetKey> = keys
            .iter()
            .filter(|key| key.iter().any(|seg| seg.to_lowercase().contains(&needle)))
            .cloned()
            .collect();
        prop_assert_eq!(result.into_owned(), expected);
    }

    #[test]
    fn prop_filters_are_idempotent(
        keys in asset_keys(),
        names in proptest::collection::vec("[a-z0-9-]{1,10}", 0..20),
        query in "[a-z0-9-]{0,3}",
    ) {
        let first = filter_asset_keys(&keys, query.as_str()).into_owned();
        let second = filter_asset_keys(&keys, query.as_str()).into_owned();
        prop_assert_eq!(first, second);

        let first = filter_partition_names(&names, query.as_str()).into_owned();
        let second = filter_partition_names(&names, query.as_str()).into_owned();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_partition_filter_is_ordered_subsequence(
        names in proptest::collection::vec("[a-zA-Z0-9-]{1,10}", 0..20),
        query in "[a-zA-Z0-9]{0,3}",
    ) {
        let result = filter_partition_names(&names, query.as_str());
        prop_assert!(is_subsequence(&*result, &names[..]));
    }

    #[test]
    fn prop_memo_agrees_with_pure_filter(
        keys in asset_keys(),
        query in "[a-zA-Z]{0,3}",
    ) {
        let memo = MemoFilter::new();
        let shared: Arc<[AssetKey]> = keys.clone().into();
        let memoized = memo.apply(&shared, &FilterQuery::new(query.as_str()));
        let pure = filter_asset_keys(&keys, query.as_str());
        prop_assert_eq!(&*memoized, &*pure);
    }
}

#[test]
fn empty_query_returns_same_reference() {
    let keys = vec![AssetKey::from_segments(["a", "b"])];
    let result = filter_asset_keys(&keys, "");
    match result {
        Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, keys.as_slice())),
        Cow::Owned(_) => panic!("identity query must not copy"),
    }
}

#[test]
fn mixed_case_segment_example() {
    let keys = vec![
        AssetKey::from_segments(["a", "b"]),
        AssetKey::from_segments(["c", "D"]),
    ];
    assert_eq!(
        filter_asset_keys(&keys, "d").into_owned(),
        vec![AssetKey::from_segments(["c", "D"])]
    );
}

#[test]
fn partition_example_preserves_order() {
    let names = vec![
        "2024-01".to_string(),
        "2024-02".to_string(),
        "2023-12".to_string(),
    ];
    assert_eq!(
        filter_partition_names(&names, "2024").into_owned(),
        vec!["2024-01".to_string(), "2024-02".to_string()]
    );
}
