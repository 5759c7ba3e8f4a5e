//! Pass-scoped memoization of resolved resource lists.
//!
//! # Invariants
//!
//! 1. **Exactly-once**: for each [`CacheKey`], `compute` runs at most once
//!    successfully; every later call returns the same `Arc` (pointer-equal).
//!
//! 2. **No poisoned entries**: a compute that fails (or panics) leaves the
//!    key empty and the next caller computes again.
//!
//! 3. **Per-key serialization**: concurrent callers for the same key block on
//!    that key's slot; callers for different keys only share the brief map
//!    lookup and never wait on each other's compute.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ahash::AHashMap;

use crate::descriptor::InterfaceId;
use crate::locale::LocaleTag;
use crate::resolver::{ResourceList, ResourceResolver, ResourceSet};

/// Cache lookup key: which interface, which requested locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub interface: InterfaceId,
    pub locale: LocaleTag,
}

impl CacheKey {
    pub fn new(interface: impl Into<InterfaceId>, locale: LocaleTag) -> Self {
        Self {
            interface: interface.into(),
            locale,
        }
    }
}

type Slot = Arc<Mutex<Option<Arc<ResourceList>>>>;

/// Memoizes [`ResourceList`]s for the lifetime of one generation pass.
#[derive(Debug, Default)]
pub struct ResourceCache {
    slots: Mutex<AHashMap<CacheKey, Slot>>,
    entries: AtomicUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list for `key`, or run `compute` and cache its
    /// result.
    ///
    /// An `Err` from `compute` is returned as-is and nothing is stored.
    pub fn get_or_compute<E, F>(&self, key: CacheKey, compute: F) -> Result<Arc<ResourceList>, E>
    where
        F: FnOnce() -> Result<ResourceList, E>,
    {
        let slot = self.slot(&key);
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(list) = guard.as_ref() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(interface = %key.interface, locale = %key.locale, "resource list cache hit");
            return Ok(Arc::clone(list));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let list = match compute() {
            Ok(list) => Arc::new(list),
            Err(err) => {
                drop(guard);
                self.release_unused_slot(&key, &slot);
                tracing::debug!(
                    interface = %key.interface,
                    locale = %key.locale,
                    "resource list computation failed; nothing cached"
                );
                return Err(err);
            }
        };

        self.computations.fetch_add(1, Ordering::Relaxed);
        self.entries.fetch_add(1, Ordering::Relaxed);
        *guard = Some(Arc::clone(&list));
        tracing::debug!(
            interface = %key.interface,
            locale = %key.locale,
            descriptors = list.len(),
            "cached resource list"
        );
        Ok(list)
    }

    /// Resolve `locale` against `set`, memoized under the set's interface.
    pub fn get_or_resolve(&self, set: &ResourceSet, locale: &LocaleTag) -> Arc<ResourceList> {
        let key = CacheKey::new(set.interface().clone(), locale.clone());
        let result: Result<_, Infallible> =
            self.get_or_compute(key, || Ok(ResourceResolver::resolve(set, locale)));
        match result {
            Ok(list) => list,
            Err(never) => match never {},
        }
    }

    /// The cached list for `key`, waiting for an in-flight compute of the
    /// same key to finish.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<ResourceList>> {
        let slot = self
            .slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()?;
        let guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Number of keys holding a computed list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.slots
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        *self.entries.get_mut() = 0;
        *self.hits.get_mut() = 0;
        *self.misses.get_mut() = 0;
        *self.computations.get_mut() = 0;
        tracing::debug!("resource list cache cleared");
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, key: &CacheKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Drop `key`'s slot after a failed compute, unless another caller is
    /// waiting on it or it was filled in the meantime.
    ///
    /// Slot handles are only cloned under the map lock, so the strong count
    /// seen here (map + caller) is stable.
    fn release_unused_slot(&self, key: &CacheKey, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let unused = slots.get(key).is_some_and(|held| {
            Arc::ptr_eq(held, slot)
                && Arc::strong_count(slot) == 2
                && held.lock().unwrap_or_else(|e| e.into_inner()).is_none()
        });
        if unused {
            slots.remove(key);
        }
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub computations: u64,
}
