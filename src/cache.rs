use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::Error;

/// Freshness tiers used by the data loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheTier {
    #[default]
    PoolData,
    HistoricalData,
    StaticData,
    EthPrice,
}

impl CacheTier {
    pub fn ttl(&self) -> Duration {
        match self {
            CacheTier::PoolData => Duration::from_secs(5 * 60),
            CacheTier::HistoricalData => Duration::from_secs(2 * 60 * 60),
            CacheTier::StaticData => Duration::from_secs(24 * 60 * 60),
            CacheTier::EthPrice => Duration::from_secs(60),
        }
    }
}

/// A cached payload together with the moment it was written
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Value,
    /// Milliseconds since epoch
    pub timestamp: i64,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(data: Value, ttl: Duration) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
            ttl,
        }
    }

    /// Stale entries are kept around and served when a refresh fails
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        let age = now_ms.saturating_sub(self.timestamp).max(0) as u64;
        Duration::from_millis(age) < self.ttl
    }
}

/// Process-wide key -> entry store. Entries are overwritten on refresh and
/// never removed.
#[derive(Default)]
pub struct DataCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entry(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    pub async fn insert_entry(&self, key: &str, entry: CacheEntry) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Cache-aside read. Returns the cached value while it is fresh,
    /// otherwise runs `fetcher` and stores its result. When `fetcher` fails
    /// the last known value is served, however old; without one the error
    /// is returned.
    ///
    /// Concurrent misses on the same key each run their own fetch.
    pub async fn fetch_with_cache<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetcher: F,
    ) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let now = Utc::now().timestamp_millis();
        let cached = self.entry(key).await;

        if let Some(entry) = &cached {
            if entry.is_fresh(now) {
                debug!("Cache hit for {}", key);
                return Ok(serde_json::from_value(entry.data.clone())?);
            }
        }

        match fetcher().await {
            Ok(data) => {
                let value = serde_json::to_value(&data)?;
                self.insert_entry(
                    key,
                    CacheEntry {
                        data: value,
                        timestamp: now,
                        ttl,
                    },
                )
                .await;
                Ok(data)
            },
            Err(e) => match cached {
                Some(entry) => {
                    warn!(
                        "Error fetching fresh data for {}, using expired cache: {}",
                        key, e
                    );
                    Ok(serde_json::from_value(entry.data)?)
                },
                None => Err(e),
            },
        }
    }
}

impl std::fmt::Debug for DataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache").finish_non_exhaustive()
    }
}
