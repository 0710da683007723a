//! Time-bounded memo of warehouse reads, keyed by query text.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A result younger than the TTL is held for the key.
    Fresh,
    /// Nothing is held, or what is held has expired.
    Stale,
}

struct Entry<V> {
    value: Arc<V>,
    fetched_at: Instant,
}

pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // A panic while holding the lock cannot leave a half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) < self.ttl
    }

    pub fn state(&self, key: &str) -> Freshness {
        self.state_at(key, Instant::now())
    }

    pub fn state_at(&self, key: &str, now: Instant) -> Freshness {
        match self.lock().get(key) {
            Some(entry) if self.is_fresh(entry, now) => Freshness::Fresh,
            _ => Freshness::Stale,
        }
    }

    pub fn get_or_fetch<E>(
        &self,
        key: &str,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        self.get_or_fetch_at(key, Instant::now(), fetch)
    }

    /// Returns the held result when it is fresh at `now`, otherwise runs `fetch`
    /// and stores what it returns. A failed fetch stores nothing, so the key
    /// stays stale and the next access retries.
    ///
    /// The lock is not held while fetching; two concurrent misses may both query.
    pub fn get_or_fetch_at<E>(
        &self,
        key: &str,
        now: Instant,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(entry) = self.lock().get(key) {
            if self.is_fresh(entry, now) {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(fetch()?);
        self.lock().insert(
            key.to_string(),
            Entry {
                value: Arc::clone(&value),
                fetched_at: now,
            },
        );
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn invalidate_all(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const TTL: Duration = Duration::from_secs(600);
    const KEY: &str = "SELECT 1";

    #[test]
    fn key_is_stale_until_first_fetch() {
        let cache: TtlCache<i32> = TtlCache::new(TTL);
        assert_eq!(cache.state(KEY), Freshness::Stale);
        cache
            .get_or_fetch(KEY, || Ok::<_, ()>(1))
            .expect("fetch succeeds");
        assert_eq!(cache.state(KEY), Freshness::Fresh);
    }

    #[test]
    fn fresh_hit_does_not_query_again() {
        let cache = TtlCache::new(TTL);
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok::<_, ()>(vec![1, 2, 3])
        };
        let start = Instant::now();
        let first = cache.get_or_fetch_at(KEY, start, fetch).expect("first");
        let second = cache
            .get_or_fetch_at(KEY, start + Duration::from_secs(599), fetch)
            .expect("second");
        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn expired_entry_is_refetched() {
        let cache = TtlCache::new(TTL);
        let start = Instant::now();
        cache.get_or_fetch_at(KEY, start, || Ok::<_, ()>(1)).expect("first");

        let later = start + TTL;
        assert_eq!(cache.state_at(KEY, later), Freshness::Stale);
        let value = cache.get_or_fetch_at(KEY, later, || Ok::<_, ()>(2)).expect("refresh");
        assert_eq!(*value, 2);
        assert_eq!(cache.state_at(KEY, later), Freshness::Fresh);
    }

    #[test]
    fn failed_fetch_leaves_key_stale() {
        let cache: TtlCache<i32> = TtlCache::new(TTL);
        let err = cache.get_or_fetch(KEY, || Err("warehouse down")).unwrap_err();
        assert_eq!(err, "warehouse down");
        assert_eq!(cache.state(KEY), Freshness::Stale);

        let value = cache.get_or_fetch(KEY, || Ok::<_, &str>(7)).expect("retry");
        assert_eq!(*value, 7);
    }

    #[test]
    fn failed_refresh_keeps_the_expired_result_out_of_reach() {
        let cache = TtlCache::new(TTL);
        let start = Instant::now();
        cache.get_or_fetch_at(KEY, start, || Ok::<_, &str>(1)).expect("first");
        let later = start + TTL + Duration::from_secs(1);
        assert!(cache.get_or_fetch_at(KEY, later, || Err("down")).is_err());
        assert_eq!(cache.state_at(KEY, later), Freshness::Stale);
    }

    #[test]
    fn keys_are_independent() {
        let cache = TtlCache::new(TTL);
        cache.get_or_fetch("a", || Ok::<_, ()>(1)).expect("a");
        assert_eq!(cache.state("a"), Freshness::Fresh);
        assert_eq!(cache.state("b"), Freshness::Stale);
    }

    #[test]
    fn invalidation_forces_a_refetch() {
        let cache = TtlCache::new(TTL);
        cache.get_or_fetch("a", || Ok::<_, ()>(1)).expect("a");
        cache.get_or_fetch("b", || Ok::<_, ()>(2)).expect("b");

        cache.invalidate("a");
        assert_eq!(cache.state("a"), Freshness::Stale);
        assert_eq!(cache.state("b"), Freshness::Fresh);

        cache.invalidate_all();
        assert_eq!(cache.state("b"), Freshness::Stale);
    }
}
