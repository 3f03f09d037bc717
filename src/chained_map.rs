//! ChainedMap: generic key/value map over separate chaining.
//!
//! Unlike `StoreTable`, keys are unique: `put` on a present key replaces the
//! value in place. Growth is checked after a new key lands, doubling once the
//! load reaches the threshold.

use crate::hasher::PolyState;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use tracing::debug;

pub const DEFAULT_MAP_CAPACITY: usize = 10;
pub const MAP_GROWTH_THRESHOLD: f64 = 0.75;

type Bucket<K, V> = Vec<(K, V)>;

#[derive(Clone, Debug)]
pub struct ChainedMap<K, V, S = PolyState> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> ChainedMap<K, V> {
    /// Ten empty buckets with the deterministic hasher.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_MAP_CAPACITY, PolyState)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, PolyState)
    }
}

impl<K: Hash + Eq, V> Default for ChainedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_MAP_CAPACITY, hasher)
    }

    /// A zero `capacity` is raised to one bucket.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index<Q>(&self, key: &Q, capacity: usize) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % capacity as u64) as usize
    }

    /// Insert or update. Returns the previous value when `key` was present;
    /// an update never changes `len` or triggers growth.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key, self.capacity());
        let bucket = &mut self.buckets[idx];
        if let Some((_, slot)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(slot, value));
        }
        bucket.push((key, value));
        self.len += 1;
        if self.len as f64 / self.capacity() as f64 >= MAP_GROWTH_THRESHOLD {
            self.resize(self.capacity() * 2);
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key, self.capacity());
        self.buckets[idx]
            .iter()
            .find(|(k, _)| Borrow::<Q>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key, self.capacity());
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|(k, _)| Borrow::<Q>::borrow(k) == key)?;
        let (_, value) = bucket.remove(pos);
        self.len -= 1;
        Some(value)
    }

    fn resize(&mut self, new_capacity: usize) {
        debug!(
            old_capacity = self.capacity(),
            new_capacity,
            len = self.len,
            "resizing chained map"
        );
        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, value) in old.into_iter().flatten() {
            let idx = self.bucket_index(&key, new_capacity);
            self.buckets[idx].push((key, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}
