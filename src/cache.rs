use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::{debug, trace};

use crate::{ChartRequest, PriceSeries};

/// How long a fetched series stays fresh by default.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    inserted: Instant,
}

/// In-process time-to-live cache for fetched price series.
///
/// Keyed by [`ChartRequest`] (ticker, interval, period in days). An entry
/// older than the TTL is never returned; the next fetch for that key
/// replaces it. There is no size bound beyond expiry: call
/// [`purge_expired`](Self::purge_expired) to drop stale entries.
///
/// Time is passed in by the caller so expiry is deterministic.
///
/// # Example
///
/// ```
/// use overlay_ta::{ChartRequest, PriceSeries, SeriesCache};
/// use std::time::{Duration, Instant};
///
/// let mut cache: SeriesCache = SeriesCache::new(Duration::from_secs(300));
/// let key = ChartRequest::default();
/// let now = Instant::now();
///
/// let fetched = cache
///     .get_or_try_insert_with(key.clone(), now, || Ok::<_, ()>(PriceSeries::empty()))
///     .unwrap();
/// assert!(fetched.is_empty());
///
/// assert!(cache.get(&key, now + Duration::from_secs(299)).is_some());
/// assert!(cache.get(&key, now + Duration::from_secs(300)).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct SeriesCache<V = PriceSeries> {
    ttl: Duration,
    entries: HashMap<ChartRequest, Entry<V>>,
}

impl<V> SeriesCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted) < self.ttl
    }

    /// Cached value for `key`, if inserted less than one TTL before `now`.
    #[must_use]
    pub fn get(&self, key: &ChartRequest, now: Instant) -> Option<&V> {
        let entry = self.entries.get(key)?;

        if self.is_fresh(entry, now) {
            trace!(%key, "series cache hit");
            Some(&entry.value)
        } else {
            trace!(%key, "series cache entry expired");
            None
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: ChartRequest, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted: now,
            },
        );
    }

    /// Returns the fresh cached value, or runs `fetch` and caches its result.
    ///
    /// A failed fetch leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Whatever `fetch` returns.
    pub fn get_or_try_insert_with<E, F>(
        &mut self,
        key: ChartRequest,
        now: Instant,
        fetch: F,
    ) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let fresh = self
            .entries
            .get(&key)
            .is_some_and(|entry| self.is_fresh(entry, now));

        if !fresh {
            debug!(%key, "series cache miss, fetching");
            let value = fetch()?;
            self.insert(key.clone(), value, now);
        }

        Ok(&self.entries[&key].value)
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted) < ttl);

        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, "purged expired series");
        }

        purged
    }
}

impl<V> Default for SeriesCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interval;

    fn key(ticker: &str) -> ChartRequest {
        ChartRequest::new(ticker, Interval::FiveMinutes, 7).unwrap()
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn default_ttl_is_five_minutes() {
        let cache: SeriesCache<u32> = SeriesCache::default();
        assert_eq!(cache.ttl(), secs(300));
        assert!(cache.is_empty());
    }

    #[test]
    fn returns_fresh_entry() {
        let now = Instant::now();
        let mut cache = SeriesCache::new(secs(10));
        cache.insert(key("AAPL"), 1, now);
        assert_eq!(cache.get(&key("AAPL"), now + secs(9)), Some(&1));
        assert_eq!(cache.get(&key("MSFT"), now), None);
    }

    #[test]
    fn expires_at_ttl() {
        let now = Instant::now();
        let mut cache = SeriesCache::new(secs(10));
        cache.insert(key("AAPL"), 1, now);
        assert_eq!(cache.get(&key("AAPL"), now + secs(10)), None);
    }

    #[test]
    fn keys_differ_by_interval_and_period() {
        let now = Instant::now();
        let mut cache = SeriesCache::new(secs(10));
        cache.insert(key("AAPL"), 1, now);

        let other_interval = ChartRequest::new("AAPL", Interval::OneDay, 7).unwrap();
        let other_period = ChartRequest::new("AAPL", Interval::FiveMinutes, 8).unwrap();
        assert_eq!(cache.get(&other_interval, now), None);
        assert_eq!(cache.get(&other_period, now), None);
    }

    mod get_or_try_insert_with {
        use super::*;

        #[test]
        fn fetches_once_while_fresh() {
            let now = Instant::now();
            let mut cache = SeriesCache::new(secs(10));
            let mut calls = 0;

            for offset in [0, 5, 9] {
                let value = cache
                    .get_or_try_insert_with(key("AAPL"), now + secs(offset), || {
                        calls += 1;
                        Ok::<_, ()>(calls)
                    })
                    .unwrap();
                assert_eq!(*value, 1);
            }
            assert_eq!(calls, 1);
        }

        #[test]
        fn refetches_after_expiry() {
            let now = Instant::now();
            let mut cache = SeriesCache::new(secs(10));
            cache.insert(key("AAPL"), 1, now);

            let value = cache
                .get_or_try_insert_with(key("AAPL"), now + secs(11), || Ok::<_, ()>(2))
                .unwrap();
            assert_eq!(*value, 2);
            assert_eq!(cache.get(&key("AAPL"), now + secs(12)), Some(&2));
        }

        #[test]
        fn failed_fetch_leaves_cache_untouched() {
            let now = Instant::now();
            let mut cache: SeriesCache<u32> = SeriesCache::new(secs(10));

            let result = cache.get_or_try_insert_with(key("AAPL"), now, || Err("offline"));
            assert_eq!(result, Err("offline"));
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn purge_drops_only_expired() {
        let now = Instant::now();
        let mut cache = SeriesCache::new(secs(10));
        cache.insert(key("AAPL"), 1, now);
        cache.insert(key("MSFT"), 2, now + secs(5));

        assert_eq!(cache.purge_expired(now + secs(12)), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("MSFT"), now + secs(12)), Some(&2));
    }
}
