//! Time-bounded, capacity-bounded key-value store
//!
//! Backs both the symbol cache (12h TTL) and the price cache (60s TTL).
//! Entries expire after a fixed TTL and are evicted in insertion order
//! once the cache is full. Reads take an explicit timestamp internally
//! so tests can drive the clock without sleeping.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Fixed-TTL, fixed-capacity map. Not thread-safe on its own; callers
/// share it behind a mutex.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<K, Entry<V>>,
    /// Insertion order of live keys; keys are unique here because only
    /// first insertions push.
    order: VecDeque<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Look up a live entry, removing it if expired.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or refresh an entry, evicting the oldest live key when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.inserted_at = now;
            return;
        }
        while self.entries.len() >= self.capacity {
            // Skip keys already dropped by expiry.
            match self.order.pop_front() {
                Some(oldest) => {
                    if self.entries.remove(&oldest).is_some() {
                        break;
                    }
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(60), 10);
        assert!(cache.is_empty());
        let t0 = Instant::now();
        cache.insert_at("k".to_string(), 1u32, t0);
        assert_eq!(cache.get_at(&"k".to_string(), t0), Some(1));
        assert_eq!(
            cache.get_at(&"k".to_string(), t0 + Duration::from_secs(59)),
            Some(1)
        );
    }

    #[test]
    fn test_expiry_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(60), 10);
        let t0 = Instant::now();
        cache.insert_at("k".to_string(), 1u32, t0);
        assert_eq!(
            cache.get_at(&"k".to_string(), t0 + Duration::from_secs(60)),
            None
        );
        // Expired entry is gone, not resurrected on a later read.
        assert_eq!(cache.get_at(&"k".to_string(), t0), None);
    }

    #[test]
    fn test_capacity_evicts_insertion_order() {
        let mut cache = TtlCache::new(Duration::from_secs(60), 2);
        let t0 = Instant::now();
        cache.insert_at("a".to_string(), 1u32, t0);
        cache.insert_at("b".to_string(), 2u32, t0);
        cache.insert_at("c".to_string(), 3u32, t0);
        assert_eq!(cache.get_at(&"a".to_string(), t0), None);
        assert_eq!(cache.get_at(&"b".to_string(), t0), Some(2));
        assert_eq!(cache.get_at(&"c".to_string(), t0), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reinsert_refreshes_without_evicting() {
        let mut cache = TtlCache::new(Duration::from_secs(60), 2);
        let t0 = Instant::now();
        cache.insert_at("a".to_string(), 1u32, t0);
        cache.insert_at("b".to_string(), 2u32, t0);
        cache.insert_at("a".to_string(), 10u32, t0 + Duration::from_secs(30));
        assert_eq!(cache.get_at(&"b".to_string(), t0), Some(2));
        assert_eq!(
            cache.get_at(&"a".to_string(), t0 + Duration::from_secs(80)),
            Some(10)
        );
    }

    #[test]
    fn test_none_values_are_cached() {
        // The symbol cache stores Option<AssetId>; a cached None must be a
        // hit, distinct from an absent key.
        let mut cache: TtlCache<String, Option<String>> =
            TtlCache::new(Duration::from_secs(60), 10);
        let t0 = Instant::now();
        cache.insert_at("miss".to_string(), None, t0);
        assert_eq!(cache.get_at(&"miss".to_string(), t0), Some(None));
        assert_eq!(cache.get_at(&"absent".to_string(), t0), None);
    }

    #[test]
    fn test_eviction_skips_expired_keys() {
        let mut cache = TtlCache::new(Duration::from_secs(10), 2);
        let t0 = Instant::now();
        cache.insert_at("a".to_string(), 1u32, t0);
        cache.insert_at("b".to_string(), 2u32, t0);
        // Expire and drop "a" via a read past its TTL.
        assert_eq!(
            cache.get_at(&"a".to_string(), t0 + Duration::from_secs(20)),
            None
        );
        cache.insert_at("c".to_string(), 3u32, t0 + Duration::from_secs(20));
        cache.insert_at("d".to_string(), 4u32, t0 + Duration::from_secs(20));
        // "b" was the oldest live key.
        assert_eq!(cache.get_at(&"b".to_string(), t0 + Duration::from_secs(21)), None);
        assert_eq!(
            cache.get_at(&"c".to_string(), t0 + Duration::from_secs(21)),
            Some(3)
        );
    }
}
