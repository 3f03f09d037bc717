//! StoreTable: separate-chaining hash table with value semantics.
//!
//! Every store crossing the table boundary is copied: `insert` keeps its own
//! clone, `find` hands back a fresh one, and `Clone` duplicates every chain.

use crate::chain::Chain;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::hasher::PolyState;
use crate::store::Store;
use core::fmt;
use core::hash::BuildHasher;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct StoreTable<S = PolyState> {
    buckets: Vec<Chain>,
    len: usize,
    max_load_factor: f64,
    hasher: S,
}

impl StoreTable {
    /// Four empty buckets, 0.75 max load factor, deterministic hasher.
    pub fn new() -> Self {
        Self::with_hasher(PolyState)
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, PolyState)
    }
}

impl Default for StoreTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher> StoreTable<S> {
    pub fn with_hasher(hasher: S) -> Self {
        let config = TableConfig::default();
        Self::build(config.initial_capacity, config.max_load_factor, hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config.initial_capacity,
            config.max_load_factor,
            hasher,
        ))
    }

    fn build(capacity: usize, max_load_factor: f64, hasher: S) -> Self {
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    fn would_exceed_load(&self, len: usize) -> bool {
        len as f64 / self.capacity() as f64 > self.max_load_factor
    }

    fn bucket_index(&self, store: &Store, capacity: usize) -> usize {
        (self.hasher.hash_one(store) % capacity as u64) as usize
    }

    /// Store a copy of `store`.
    ///
    /// The load factor the table would have with the new element counted is
    /// checked first; above the maximum the table doubles and rehashes, so
    /// the new element is placed against the post-resize capacity.
    pub fn insert(&mut self, store: &Store) {
        if self.would_exceed_load(self.len + 1) {
            self.resize(self.capacity() * 2);
        }
        let idx = self.bucket_index(store, self.capacity());
        self.buckets[idx].insert(store);
        self.len += 1;
        trace!(owner = store.owner(), bucket = idx, len = self.len, "inserted store");
    }

    /// Copy of the most recently inserted store owned by `owner`.
    pub fn find(&self, owner: &str) -> Option<Store> {
        self.bucket_for(owner).find(owner)
    }

    pub fn contains_key(&self, owner: &str) -> bool {
        !owner.is_empty() && self.bucket_for(owner).iter().any(|s| s.owner() == owner)
    }

    /// Remove the most recently inserted store owned by `owner`. Capacity
    /// never shrinks.
    pub fn remove(&mut self, owner: &str) -> Option<Store> {
        let probe = Store::new(owner, 0.0);
        let idx = self.bucket_index(&probe, self.capacity());
        let removed = self.buckets[idx].remove(owner)?;
        self.len -= 1;
        Some(removed)
    }

    fn bucket_for(&self, owner: &str) -> &Chain {
        // Only the owner participates in the hash; the sales value is a placeholder.
        let probe = Store::new(owner, 0.0);
        &self.buckets[self.bucket_index(&probe, self.capacity())]
    }

    /// Rebuild into `new_capacity` buckets, rehashing every element against
    /// the new capacity. `len` is unchanged.
    fn resize(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.max(1);
        debug!(
            old_capacity = self.capacity(),
            new_capacity,
            len = self.len,
            "resizing store table"
        );
        let mut fresh = empty_buckets(new_capacity);
        for chain in &self.buckets {
            // Replay tail-to-head so prepending keeps recency order per owner.
            for store in chain.to_vec().into_iter().rev() {
                let idx = self.bucket_index(&store, new_capacity);
                fresh[idx].insert(&store);
            }
        }
        self.buckets = fresh;
    }

    /// Buckets in index order.
    pub fn buckets(&self) -> core::slice::Iter<'_, Chain> {
        self.buckets.iter()
    }

    /// All stores: buckets in index order, each chain most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &Store> + '_ {
        self.buckets.iter().flat_map(Chain::iter)
    }
}

impl<S: Clone> StoreTable<S> {
    /// Independent deep copy; equivalent to `clone()`.
    pub fn copy_instance(&self) -> Self {
        self.clone()
    }
}

fn empty_buckets(capacity: usize) -> Vec<Chain> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

impl<S: BuildHasher> fmt::Display for StoreTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Hash Table Contents (Size: {}, Elements: {}, Load Factor: {:.2}) ---",
            self.capacity(),
            self.len,
            self.load_factor()
        )?;
        for (i, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "Bucket {i}: {chain}")?;
        }
        f.write_str(&"-".repeat(66))
    }
}
