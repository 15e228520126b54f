//! Keyed query cache and fetch coordinator.
//!
//! # Design
//! The same host-does-IO split as the client: the cache never fetches.
//! `plan` tells the caller whether a fetch must be issued for a key, marks
//! the key in flight so overlapping plans collapse to one fetch, and the
//! caller feeds the outcome back through `resolve`. Rendering reads `state`,
//! which is independent of planning — a stale value keeps serving as
//! `Success` while its refetch is in flight.
//!
//! Time is passed in by the caller as `Instant` values, so the module reads
//! no clock and tests need no sleeping.
//!
//! Per-key lifecycle: `idle → pending → {success, error}`. An error is held
//! until an explicit `invalidate` or `reset`; `plan` never retries on its
//! own.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What the caller must do for a key, as decided by [`QueryCache::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPlan {
    /// Execute the fetch and report back through `resolve`.
    Fetch,
    /// A fetch for this key is already in flight; issue nothing.
    InFlight,
    /// Nothing to do: the cached value is fresh, or an error is waiting for
    /// an explicit retry.
    Settled,
}

/// Render state for a key: the `{pending, error, success}` surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState<'a, V> {
    /// No data yet (idle or first fetch outstanding).
    Pending,
    /// The last fetch failed.
    Error(&'a str),
    /// A value is cached (possibly stale while a refetch runs).
    Success(&'a V),
}

struct Entry<V> {
    value: Option<V>,
    fetched_at: Option<Instant>,
    in_flight: bool,
    error: Option<String>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Entry {
            value: None,
            fetched_at: None,
            in_flight: false,
            error: None,
        }
    }
}

/// Keyed cache with a staleness window, in-flight deduplication, and
/// explicit invalidation.
pub struct QueryCache<V> {
    stale_after: Duration,
    entries: HashMap<String, Entry<V>>,
}

impl<V> QueryCache<V> {
    /// `stale_after` is the staleness window: a cached value older than this
    /// is served but eligible for background refresh.
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: HashMap::new(),
        }
    }

    /// Decide whether the caller must fetch `key` now. Returning
    /// `QueryPlan::Fetch` marks the key in flight, so a second overlapping
    /// `plan` for the same key gets `InFlight` instead.
    pub fn plan(&mut self, key: &str, now: Instant) -> QueryPlan {
        let entry = self.entries.entry(key.to_string()).or_default();
        if entry.in_flight {
            return QueryPlan::InFlight;
        }
        if entry.error.is_some() {
            return QueryPlan::Settled;
        }
        let fresh = entry
            .fetched_at
            .is_some_and(|at| now.duration_since(at) < self.stale_after);
        if entry.value.is_some() && fresh {
            return QueryPlan::Settled;
        }
        entry.in_flight = true;
        QueryPlan::Fetch
    }

    /// Feed back the outcome of a fetch directed by `plan`. A failure keeps
    /// any previously cached value but parks the key in the error state.
    pub fn resolve(&mut self, key: &str, result: Result<V, String>, now: Instant) {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.in_flight = false;
        match result {
            Ok(value) => {
                entry.value = Some(value);
                entry.fetched_at = Some(now);
                entry.error = None;
            }
            Err(message) => {
                entry.error = Some(message);
            }
        }
    }

    /// Mark `key` stale so the next `plan` refetches. The cached value keeps
    /// serving until the refetch resolves; a stored error is cleared.
    pub fn invalidate(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.fetched_at = None;
            entry.error = None;
        }
    }

    /// Drop everything stored for `key`, returning it to idle. Used by the
    /// error boundary's retry so the query starts from a clean fetch.
    pub fn reset(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// The `{pending, error, success}` state for rendering.
    pub fn state(&self, key: &str) -> QueryState<'_, V> {
        match self.entries.get(key) {
            Some(entry) => {
                if let Some(message) = &entry.error {
                    QueryState::Error(message)
                } else if let Some(value) = &entry.value {
                    QueryState::Success(value)
                } else {
                    QueryState::Pending
                }
            }
            None => QueryState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "todos";
    const WINDOW: Duration = Duration::from_secs(30);

    fn cache() -> QueryCache<Vec<u32>> {
        QueryCache::new(WINDOW)
    }

    #[test]
    fn first_plan_directs_a_fetch() {
        let mut cache = cache();
        assert_eq!(cache.plan(KEY, Instant::now()), QueryPlan::Fetch);
    }

    #[test]
    fn overlapping_plans_collapse_to_one_fetch() {
        let mut cache = cache();
        let now = Instant::now();
        assert_eq!(cache.plan(KEY, now), QueryPlan::Fetch);
        assert_eq!(cache.plan(KEY, now), QueryPlan::InFlight);
        assert_eq!(cache.plan(KEY, now), QueryPlan::InFlight);
    }

    #[test]
    fn fresh_value_settles_without_fetching() {
        let mut cache = cache();
        let now = Instant::now();
        assert_eq!(cache.plan(KEY, now), QueryPlan::Fetch);
        cache.resolve(KEY, Ok(vec![1]), now);
        assert_eq!(cache.plan(KEY, now + Duration::from_secs(1)), QueryPlan::Settled);
        assert_eq!(cache.state(KEY), QueryState::Success(&vec![1]));
    }

    #[test]
    fn stale_value_serves_while_refetching() {
        let mut cache = cache();
        let now = Instant::now();
        cache.plan(KEY, now);
        cache.resolve(KEY, Ok(vec![1]), now);

        let later = now + WINDOW + Duration::from_secs(1);
        assert_eq!(cache.plan(KEY, later), QueryPlan::Fetch);
        // Old value still renders while the refetch is outstanding.
        assert_eq!(cache.state(KEY), QueryState::Success(&vec![1]));
        cache.resolve(KEY, Ok(vec![1, 2]), later);
        assert_eq!(cache.state(KEY), QueryState::Success(&vec![1, 2]));
    }

    #[test]
    fn invalidate_forces_refetch_and_keeps_serving() {
        let mut cache = cache();
        let now = Instant::now();
        cache.plan(KEY, now);
        cache.resolve(KEY, Ok(vec![1]), now);

        cache.invalidate(KEY);
        assert_eq!(cache.state(KEY), QueryState::Success(&vec![1]));
        assert_eq!(cache.plan(KEY, now), QueryPlan::Fetch);
    }

    #[test]
    fn error_is_held_until_reset() {
        let mut cache = cache();
        let now = Instant::now();
        cache.plan(KEY, now);
        cache.resolve(KEY, Err("request failed: 500 Internal Server Error".to_string()), now);

        assert!(matches!(cache.state(KEY), QueryState::Error(_)));
        // No automatic retry.
        assert_eq!(cache.plan(KEY, now), QueryPlan::Settled);

        cache.reset(KEY);
        assert_eq!(cache.state(KEY), QueryState::Pending);
        assert_eq!(cache.plan(KEY, now), QueryPlan::Fetch);
    }

    #[test]
    fn invalidate_clears_an_error() {
        let mut cache = cache();
        let now = Instant::now();
        cache.plan(KEY, now);
        cache.resolve(KEY, Err("boom".to_string()), now);

        cache.invalidate(KEY);
        assert_eq!(cache.plan(KEY, now), QueryPlan::Fetch);
    }

    #[test]
    fn failure_keeps_previous_value_behind_the_error() {
        let mut cache = cache();
        let now = Instant::now();
        cache.plan(KEY, now);
        cache.resolve(KEY, Ok(vec![1]), now);
        cache.invalidate(KEY);
        cache.plan(KEY, now);
        cache.resolve(KEY, Err("boom".to_string()), now);

        assert_eq!(cache.state(KEY), QueryState::Error("boom"));
        cache.invalidate(KEY);
        assert_eq!(cache.state(KEY), QueryState::Success(&vec![1]));
    }

    #[test]
    fn unknown_key_is_pending() {
        let cache = cache();
        assert_eq!(cache.state("nope"), QueryState::Pending);
    }
}
