//! In-process get-or-set cache with per-entry TTL
//!
//! Entries are only evicted when read after their TTL or invalidated
//! explicitly; there is no size bound.
//!
//! Every `invalidate` bumps a generation counter. A `get_or_set` load that
//! started before an invalidation returns its value without storing it.

use dashmap::DashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::Result;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Cache shared across request handlers; cloning shares the underlying map
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    entries: Arc<DashMap<String, Entry<V>>>,
    generation: Arc<AtomicU64>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live value under `key`, if any
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .map(|entry| (entry.expires_at > now, entry.value.clone()));

        match hit {
            Some((true, value)) => Some(value),
            Some((false, _)) => {
                self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(
            key.into(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Return the cached value, or await `loader`, store its value for `ttl` and return it.
    ///
    /// Loader errors are returned unchanged and nothing is stored. Nor is the
    /// value stored if the cache was invalidated while `loader` ran.
    pub async fn get_or_set<F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(key) {
            tracing::trace!(cache_key = key, "Cache hit");
            return Ok(value);
        }

        tracing::trace!(cache_key = key, "Cache miss");
        let started = self.generation.load(Ordering::Acquire);
        let value = loader().await?;

        // Checked under the entry lock; `invalidate` bumps before removing
        let slot = self.entries.entry(key.to_string());
        if self.generation.load(Ordering::Acquire) == started {
            slot.insert(Entry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            });
        } else {
            tracing::trace!(cache_key = key, "Cache invalidated during load, not stored");
        }
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
