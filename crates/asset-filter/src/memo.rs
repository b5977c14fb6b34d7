//! Single-slot memoization
//!
//! Provides [`MemoFilter`], which remembers the last `(collection, query)`
//! pair it saw. The collection is compared by reference (`Arc::ptr_eq`) and
//! the query by value, so a view that re-renders with the same inputs gets
//! back the very same `Arc` without re-filtering.

use std::borrow::Cow;
use std::sync::Arc;

use asset_model::FilterQuery;
use parking_lot::Mutex;

use crate::filter::{filter_items, Searchable};

#[derive(Debug)]
struct MemoSlot<T> {
    input: Arc<[T]>,
    query: FilterQuery,
    output: Arc<[T]>,
}

/// Memoized filter over one collection
#[derive(Debug)]
pub struct MemoFilter<T> {
    slot: Mutex<Option<MemoSlot<T>>>,
}

impl<T> Default for MemoFilter<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<T> MemoFilter<T>
where
    T: Searchable + Clone,
{
    /// Create an empty memo
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `items`, reusing the previous result when neither input changed
    ///
    /// The identity query returns `items` itself.
    pub fn apply(&self, items: &Arc<[T]>, query: &FilterQuery) -> Arc<[T]> {
        if query.is_identity() {
            return Arc::clone(items);
        }

        let mut slot = self.slot.lock();
        if let Some(prev) = slot.as_ref() {
            if Arc::ptr_eq(&prev.input, items) && prev.query == *query {
                return Arc::clone(&prev.output);
            }
        }

        let output: Arc<[T]> = match filter_items(items, query) {
            Cow::Borrowed(_) => Arc::clone(items),
            Cow::Owned(filtered) => filtered.into(),
        };
        tracing::trace!(
            query = query.raw(),
            input = items.len(),
            output = output.len(),
            "recomputed memoized filter"
        );
        *slot = Some(MemoSlot {
            input: Arc::clone(items),
            query: query.clone(),
            output: Arc::clone(&output),
        });
        output
    }

    /// Forget the remembered result
    pub fn clear(&self) {
        self.slot.lock().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_model::AssetKey;

    fn keys() -> Arc<[AssetKey]> {
        vec![
            AssetKey::from_segments(["warehouse", "orders"]),
            AssetKey::from_segments(["warehouse", "customers"]),
            AssetKey::single("raw_orders"),
        ]
        .into()
    }

    #[test]
    fn unchanged_inputs_return_same_arc() {
        let memo = MemoFilter::new();
        let keys = keys();
        let query = FilterQuery::new("order");

        let first = memo.apply(&keys, &query);
        let second = memo.apply(&keys, &query);
        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn identity_query_returns_input_arc() {
        let memo = MemoFilter::new();
        let keys = keys();
        let result = memo.apply(&keys, &FilterQuery::empty());
        assert!(Arc::ptr_eq(&result, &keys));
    }

    #[test]
    fn query_change_recomputes() {
        let memo = MemoFilter::new();
        let keys = keys();
        let orders = memo.apply(&keys, &FilterQuery::new("order"));
        let customers = memo.apply(&keys, &FilterQuery::new("cust"));
        assert!(!Arc::ptr_eq(&orders, &customers));
        assert_eq!(customers.len(), 1);
    }

    #[test]
    fn equal_but_distinct_collection_recomputes() {
        let memo = MemoFilter::new();
        let a = keys();
        let b = keys();
        let query = FilterQuery::new("order");
        let from_a = memo.apply(&a, &query);
        let from_b = memo.apply(&b, &query);
        assert_eq!(from_a, from_b);
        assert!(!Arc::ptr_eq(&from_a, &from_b));
    }

    #[test]
    fn clear_forgets_result() {
        let memo = MemoFilter::new();
        let keys = keys();
        let query = FilterQuery::new("order");
        let first = memo.apply(&keys, &query);
        memo.clear();
        let second = memo.apply(&keys, &query);
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
