//! Bounded in-memory memoization of normalization results.
//!
//! Keys are 64-bit fingerprints of `(text, language override, the subset of
//! flags that affects output)`. Entries expire after a TTL and the oldest
//! entry is evicted at capacity. A single mutex guards the map — the cache is
//! the only mutable shared structure in the crate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::trace::NormalizationResult;

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(3600),
        }
    }
}

struct Entry {
    value: NormalizationResult,
    expires_at: Instant,
    inserted_at: Instant,
}

pub struct ResultCache {
    config: CacheConfig,
    entries: Mutex<HashMap<u64, Entry>>,
}

/// FNV-1a over the request key components.
pub fn fingerprint(text: &str, language: &str, flags_fingerprint: u64) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    let mut feed = |bytes: &[u8]| {
        for b in bytes {
            hash ^= *b as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
    };
    feed(text.as_bytes());
    feed(&[0xFF]);
    feed(language.as_bytes());
    feed(&[0xFF]);
    feed(&flags_fingerprint.to_le_bytes());
    hash
}

impl ResultCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: u64) -> Option<NormalizationResult> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: u64, value: NormalizationResult) {
        if self.config.max_entries == 0 {
            return;
        }
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if entries.len() >= self.config.max_entries && !entries.contains_key(&key) {
            // Evict the oldest entry. Linear scan is fine at these sizes and
            // keeps the structure to one map.
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| *k)
            {
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.config.ttl,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::trace::TraceCollector;

    fn result(text: &str) -> NormalizationResult {
        TraceCollector::new(false).finish(text.to_string(), vec![text.to_string()], Lang::Ru, 1.0, text.len())
    }

    #[test]
    fn test_put_get_roundtrip() {
        let cache = ResultCache::new(CacheConfig::default());
        let key = fingerprint("Иван", "ru", 42);
        assert!(cache.get(key).is_none());
        cache.put(key, result("Иван"));
        assert_eq!(cache.get(key).unwrap().normalized, "Иван");
    }

    #[test]
    fn test_fingerprint_components_matter() {
        let base = fingerprint("Иван", "ru", 42);
        assert_ne!(base, fingerprint("Иван", "uk", 42));
        assert_ne!(base, fingerprint("Иванов", "ru", 42));
        assert_ne!(base, fingerprint("Иван", "ru", 43));
        assert_eq!(base, fingerprint("Иван", "ru", 42));
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = ResultCache::new(CacheConfig {
            max_entries: 10,
            ttl: Duration::from_millis(0),
        });
        let key = fingerprint("x", "ru", 0);
        cache.put(key, result("x"));
        assert!(cache.get(key).is_none());
    }

    #[test]
    fn test_capacity_eviction() {
        let cache = ResultCache::new(CacheConfig {
            max_entries: 2,
            ttl: Duration::from_secs(60),
        });
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            cache.put(i as u64, result(text));
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = ResultCache::new(CacheConfig {
            max_entries: 0,
            ttl: Duration::from_secs(60),
        });
        cache.put(1, result("a"));
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_clear() {
        let cache = ResultCache::new(CacheConfig::default());
        cache.put(1, result("a"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
