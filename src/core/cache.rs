use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Target currency code mapped to a multiplicative conversion factor,
/// relative to a single base currency.
pub type RateTable = HashMap<String, f64>;

/// A rate table together with the instant it was fetched. Entries are
/// written whole on a successful fetch and never partially updated.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub rates: RateTable,
    pub fetched_at: DateTime<Utc>,
}

/// Time source for freshness checks, injectable so TTL behavior is
/// testable without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Per-base-currency rate table cache with a freshness window.
///
/// `get` answers only with entries younger than the TTL; stale entries
/// are ignored rather than evicted and stay around until the next
/// successful fetch overwrites them. One entry per distinct base, so
/// growth is bounded by the set of currencies ever used as a source.
pub struct RateCache {
    inner: Mutex<HashMap<String, CacheEntry>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            clock,
        }
    }

    /// Returns the entry for `base` only while it is fresh.
    pub async fn get(&self, base: &str) -> Option<CacheEntry> {
        let cache = self.inner.lock().await;
        match cache.get(base) {
            Some(entry) if self.is_fresh(entry) => {
                debug!("Cache HIT for base {}", base);
                Some(entry.clone())
            }
            Some(_) => {
                debug!("Cache STALE for base {}", base);
                None
            }
            None => {
                debug!("Cache MISS for base {}", base);
                None
            }
        }
    }

    /// Unconditionally overwrites the entry for `base`, stamping it with
    /// the current time. Returns the stored entry.
    pub async fn put(&self, base: &str, rates: RateTable) -> CacheEntry {
        let entry = CacheEntry {
            rates,
            fetched_at: self.clock.now(),
        };
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for base {}", base);
        cache.insert(base.to_string(), entry.clone());
        entry
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now().signed_duration_since(entry.fetched_at) < self.ttl
    }
}
