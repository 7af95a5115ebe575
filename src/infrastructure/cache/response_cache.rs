//! In-memory HTTP response cache with per-entry TTL.

use bytes::Bytes;
use dashmap::DashMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::utils::memory::MemorySnapshot;

struct CachedEntry {
    body: Bytes,
    /// `None` never expires.
    expires_at: Option<Instant>,
}

impl CachedEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Counters and sizes reported by [`ResponseCache::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Live (unexpired) keys.
    pub keys: usize,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub memory: MemorySnapshot,
}

/// Result of [`ResponseCache::clear`].
///
/// Serializes as the removed count, or the string `"all"` for a full flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    All,
    Removed(usize),
}

impl Serialize for ClearOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Removed(count) => serializer.serialize_u64(*count as u64),
        }
    }
}

/// Thread-safe response cache keyed by request signature.
///
/// Entries are invisible once `now >= expires_at`, whether or not the
/// background sweeper has physically removed them yet. Writers are not
/// coalesced: the last `set` for a key wins and resets its expiry.
pub struct ResponseCache {
    entries: DashMap<String, CachedEntry>,
    default_ttl: u64,
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
}

impl ResponseCache {
    /// Creates an empty cache. `default_ttl` (seconds) applies to [`Self::insert`].
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
        }
    }

    /// Default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Builds the cache key for a request: `"{METHOD}:{path?query}"`.
    pub fn key_for(method: &str, path_and_query: &str) -> String {
        format!("{method}:{path_and_query}")
    }

    /// Returns the cached body if present and not expired.
    ///
    /// An expired entry found here is purged immediately.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.body.clone());
            }
            drop(entry);
            // A concurrent set may have refreshed the key since the read above.
            self.entries.remove_if(key, |_, e| !e.is_live(now));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores `body` under `key` for `ttl_seconds`.
    ///
    /// A TTL of `0`, or one too large to represent as a deadline, never expires.
    pub fn set(&self, key: impl Into<String>, body: Bytes, ttl_seconds: u64) {
        let expires_at = if ttl_seconds == 0 {
            None
        } else {
            Instant::now().checked_add(Duration::from_secs(ttl_seconds))
        };

        self.entries.insert(key.into(), CachedEntry { body, expires_at });
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Stores `body` under `key` with the default TTL.
    pub fn insert(&self, key: impl Into<String>, body: Bytes) {
        self.set(key, body, self.default_ttl);
    }

    /// Returns live key count, cumulative counters and process memory.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        CacheStats {
            keys: self.entries.iter().filter(|e| e.is_live(now)).count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            memory: MemorySnapshot::capture(),
        }
    }

    /// Removes every live key containing `pattern` as a plain substring, or
    /// every key when `pattern` is `None` or empty.
    pub fn clear(&self, pattern: Option<&str>) -> ClearOutcome {
        match pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => {
                let now = Instant::now();
                let mut removed = 0;
                self.entries.retain(|key, entry| {
                    if !key.contains(pattern) {
                        return true;
                    }
                    if entry.is_live(now) {
                        removed += 1;
                    }
                    false
                });
                self.deletes.fetch_add(removed as u64, Ordering::Relaxed);
                debug!(pattern, removed, "Response cache cleared by pattern");
                ClearOutcome::Removed(removed)
            }
            None => {
                let removed = self.entries.len();
                self.entries.clear();
                self.deletes.fetch_add(removed as u64, Ordering::Relaxed);
                debug!(removed, "Response cache flushed");
                ClearOutcome::All
            }
        }
    }

    /// Physically removes expired entries and returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    /// Spawns the periodic sweeper.
    ///
    /// The task stops when `shutdown` flips to `true`, its sender is dropped,
    /// or the cache itself is dropped.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        period: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await; // skip first immediate tick

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let Some(cache) = cache.upgrade() else {
                            break;
                        };
                        let removed = cache.sweep();
                        if removed > 0 {
                            debug!(removed, "Swept expired response cache entries");
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            debug!("Response cache sweeper stopped");
        })
    }

    #[cfg(test)]
    fn stored_len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn body(s: &'static str) -> Bytes {
        Bytes::from_static(s.as_bytes())
    }

    #[test]
    fn test_key_for() {
        assert_eq!(
            ResponseCache::key_for("GET", "/api/addictions/nicotine?x=1"),
            "GET:/api/addictions/nicotine?x=1"
        );
    }

    #[tokio::test]
    async fn test_get_on_empty_cache_is_miss() {
        let cache = ResponseCache::new(300);

        assert!(cache.get("GET:/api/addictions/nicotine").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_set_then_get_returns_exact_body() {
        let cache = ResponseCache::new(300);
        let payload = body(r#"{"status":"success","data":{"id":"nicotine"}}"#);

        cache.set("GET:/api/addictions/nicotine", payload.clone(), 300);

        assert_eq!(cache.get("GET:/api/addictions/nicotine"), Some(payload));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.keys, 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = ResponseCache::new(300);

        cache.set("k", body("v1"), 300);
        cache.set("k", body("v2"), 300);

        assert_eq!(cache.get("k"), Some(body("v2")));
        assert_eq!(cache.stats().keys, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_lazily_before_sweep() {
        let cache = ResponseCache::new(300);
        cache.set("k", body("v"), 1);

        assert_eq!(cache.get("k"), Some(body("v")));

        advance(Duration::from_millis(1001)).await;

        assert!(cache.get("k").is_none());
        assert_eq!(cache.stored_len(), 0, "expired entry purged on access");
        assert_eq!(cache.stats().keys, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_expiry_on_overwrite() {
        let cache = ResponseCache::new(300);
        cache.set("k", body("v1"), 2);

        advance(Duration::from_secs(1)).await;
        cache.set("k", body("v2"), 2);
        advance(Duration::from_millis(1500)).await;

        assert_eq!(cache.get("k"), Some(body("v2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let cache = ResponseCache::new(300);
        cache.set("k", body("v"), 0);

        advance(Duration::from_secs(86_400)).await;

        assert_eq!(cache.get("k"), Some(body("v")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_never_expires() {
        let cache = ResponseCache::new(u64::MAX);
        cache.set("k", body("v"), u64::MAX);
        cache.insert("d", body("w"));

        advance(Duration::from_secs(86_400)).await;

        assert_eq!(cache.get("k"), Some(body("v")));
        assert_eq!(cache.get("d"), Some(body("w")));
        assert_eq!(cache.sweep(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_uses_default_ttl() {
        let cache = ResponseCache::new(5);
        cache.insert("k", body("v"));

        advance(Duration::from_secs(4)).await;
        assert!(cache.get("k").is_some());

        advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_expired() {
        let cache = ResponseCache::new(300);
        cache.set("short", body("a"), 1);
        cache.set("long", body("b"), 60);

        advance(Duration::from_secs(2)).await;

        assert_eq!(cache.stored_len(), 2);
        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.stored_len(), 1);
        assert!(cache.get("long").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_on_interval() {
        let cache = Arc::new(ResponseCache::new(300));
        let (_tx, rx) = watch::channel(false);
        let _handle = cache.spawn_sweeper(Duration::from_secs(60), rx);

        cache.set("k", body("v"), 1);
        assert_eq!(cache.stored_len(), 1);

        // Paused clock auto-advances through the sweeper's 60s tick.
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(cache.stored_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_on_shutdown() {
        let cache = Arc::new(ResponseCache::new(300));
        let (tx, rx) = watch::channel(false);
        let handle = cache.spawn_sweeper(Duration::from_secs(60), rx);

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_cache_dropped() {
        let cache = Arc::new(ResponseCache::new(300));
        let (_tx, rx) = watch::channel(false);
        let handle = cache.spawn_sweeper(Duration::from_secs(1), rx);

        drop(cache);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweeper outlived its cache")
            .unwrap();
    }

    #[tokio::test]
    async fn test_clear_by_substring() {
        let cache = ResponseCache::new(300);
        cache.set("GET:/api/addictions/foo", body("1"), 300);
        cache.set("GET:/api/addictions/foobar", body("2"), 300);
        cache.set("GET:/api/addictions/bar", body("3"), 300);

        assert_eq!(cache.clear(Some("foo")), ClearOutcome::Removed(2));

        assert!(cache.get("GET:/api/addictions/foo").is_none());
        assert!(cache.get("GET:/api/addictions/foobar").is_none());
        assert_eq!(cache.get("GET:/api/addictions/bar"), Some(body("3")));
        assert_eq!(cache.stats().deletes, 2);
    }

    #[tokio::test]
    async fn test_clear_pattern_is_literal_substring() {
        let cache = ResponseCache::new(300);
        cache.set("GET:/a.b", body("1"), 300);
        cache.set("GET:/axb", body("2"), 300);

        assert_eq!(cache.clear(Some("a.b")), ClearOutcome::Removed(1));
        assert!(cache.get("GET:/axb").is_some());

        assert_eq!(cache.clear(Some("*")), ClearOutcome::Removed(0));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let cache = ResponseCache::new(300);
        cache.set("a", body("1"), 300);
        cache.set("b", body("2"), 300);

        assert_eq!(cache.clear(None), ClearOutcome::All);
        assert_eq!(cache.stats().keys, 0);
        assert!(cache.get("a").is_none());
    }

    #[tokio::test]
    async fn test_empty_pattern_flushes_everything() {
        let cache = ResponseCache::new(300);
        cache.set("a", body("1"), 300);

        assert_eq!(cache.clear(Some("")), ClearOutcome::All);
        assert_eq!(cache.stats().keys, 0);
    }

    #[tokio::test]
    async fn test_stats_does_not_mutate() {
        let cache = ResponseCache::new(300);
        cache.set("a", body("1"), 300);

        let first = cache.stats();
        let second = cache.stats();

        assert_eq!(first.keys, second.keys);
        assert_eq!(first.hits, second.hits);
        assert_eq!(first.misses, second.misses);
        assert_eq!(cache.stored_len(), 1);
    }

    #[test]
    fn test_clear_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(ClearOutcome::All).unwrap(),
            serde_json::json!("all")
        );
        assert_eq!(
            serde_json::to_value(ClearOutcome::Removed(3)).unwrap(),
            serde_json::json!(3)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        let cache = Arc::new(ResponseCache::new(300));

        let mut tasks = Vec::new();
        for t in 0..8 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("GET:/item/{}", i % 50);
                    cache.set(key.clone(), Bytes::from(format!("{t}-{i}")), 300);
                    assert!(cache.get(&key).is_some());
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.keys, 50);
        assert_eq!(stats.sets, 1600);
        assert_eq!(stats.hits, 1600);
    }
}
