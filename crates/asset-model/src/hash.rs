//! Content hashing for collections
//!
//! Provides [`ContentHash`], a 32-byte Blake3 digest used to address
//! key and partition collections by value, and [`ContentAddressed`] for
//! items that can feed a hasher unambiguously.

use crate::key::AssetKey;
use crate::partition::PartitionName;

/// A 32-byte content hash (Blake3)
///
/// Immutable and cheap to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash an ordered collection
    ///
    /// Order matters: a permuted collection hashes differently.
    #[must_use]
    pub fn of_items<T: ContentAddressed>(items: &[T]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(T::DOMAIN.as_bytes());
        hasher.update(&(items.len() as u64).to_le_bytes());
        for item in items {
            item.feed(&mut hasher);
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// First 16 hex chars, for log lines
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

/// Items that can be fed into a collection hash
///
/// Each implementation length-prefixes its strings so that adjacent items
/// cannot alias (`["ab"]` vs `["a", "b"]`).
pub trait ContentAddressed {
    /// Domain tag mixed into the collection hash
    const DOMAIN: &'static str;

    /// Feed this item into the hasher
    fn feed(&self, hasher: &mut blake3::Hasher);
}

fn feed_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

impl ContentAddressed for AssetKey {
    const DOMAIN: &'static str = "asset-key";

    fn feed(&self, hasher: &mut blake3::Hasher) {
        hasher.update(&(self.len() as u64).to_le_bytes());
        for segment in self.iter() {
            feed_str(hasher, segment);
        }
    }
}

impl ContentAddressed for PartitionName {
    const DOMAIN: &'static str = "partition";

    fn feed(&self, hasher: &mut blake3::Hasher) {
        feed_str(hasher, self.as_str());
    }
}

impl ContentAddressed for String {
    const DOMAIN: &'static str = "string";

    fn feed(&self, hasher: &mut blake3::Hasher) {
        feed_str(hasher, self);
    }
}
