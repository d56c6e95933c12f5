//! Fx hash map alias.
//!
//! Metadata lookups and the declaration registry are keyed by fully-qualified
//! type names; [`FxHashMap`] from `rustc-hash` is used for both.

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Creates an [`FxHashMap`] with room for at least `capacity` entries.
///
/// # Examples
///
/// ```
/// use tshub_core::{FxHashMap, fx_hash_map_with_capacity};
///
/// let mut index: FxHashMap<String, usize> = fx_hash_map_with_capacity(16);
/// index.insert("Demo.SomeObjectModel".to_owned(), 0);
/// assert_eq!(index.get("Demo.SomeObjectModel"), Some(&0));
/// ```
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}
