use std::{
    sync::{
        atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::{
    cache::DataCache,
    model::{PoolProfile, PoolRegistry},
    provider::{PoolDataSource, PriceProvider},
};

/// Timings of the preload scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadSettings {
    pub interval: Duration,
    pub startup_delay: Duration,
    pub pool_delay: Duration,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10 * 60),
            startup_delay: Duration::from_millis(2000),
            pool_delay: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Default)]
pub struct PreloadStatus {
    pub(crate) is_preloading: AtomicBool,
    pub(crate) last_preload: AtomicI64,
    pub(crate) failed_attempts: AtomicU32,
    pub(crate) scheduled_task: Mutex<Option<JoinHandle<()>>>,
}

/// Cache store, upstream collaborators and preload state for pool
/// statistics. Owned by the application state and shared through `Arc`.
pub struct DataLoader {
    pub(crate) cache: DataCache,
    pub(crate) registry: PoolRegistry,
    pub(crate) prices: Arc<dyn PriceProvider>,
    pub(crate) pools: Arc<dyn PoolDataSource>,
    pub(crate) settings: PreloadSettings,
    pub(crate) status: PreloadStatus,
}

impl DataLoader {
    pub fn new(
        prices: Arc<dyn PriceProvider>,
        pools: Arc<dyn PoolDataSource>,
        registry: PoolRegistry,
        settings: PreloadSettings,
    ) -> Self {
        Self {
            cache: DataCache::new(),
            registry,
            prices,
            pools,
            settings,
            status: PreloadStatus::default(),
        }
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &PreloadSettings {
        &self.settings
    }

    pub(crate) fn profile(&self, pool_address: &str) -> PoolProfile {
        self.registry.profile(pool_address)
    }

    pub fn is_preloading(&self) -> bool {
        self.status.is_preloading.load(Ordering::SeqCst)
    }

    pub fn last_preload(&self) -> i64 {
        self.status.last_preload.load(Ordering::SeqCst)
    }

    pub fn failed_attempts(&self) -> u32 {
        self.status.failed_attempts.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for DataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .field("status", &self.status)
            .finish()
    }
}
