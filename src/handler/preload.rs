//! Cache warm-up
//!
//! A preload run walks the configured pools in order and fetches every
//! pool statistic for the default network, so user requests hit a warm
//! cache. Only one run is active at a time; a run requested while another
//! is in progress is skipped, not queued.

use std::{
    sync::{atomic::Ordering, Arc, MutexGuard},
    time::Instant,
};

use chrono::Utc;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{error, info};

use crate::{
    error::Error,
    handler::{DataLoader, PreloadStatus},
    model::{PreloadOutcome, PreloadSnapshot, DEFAULT_NETWORK},
};

/// Clears the running flag and stamps the run, however it ended
struct PreloadGuard<'a> {
    status: &'a PreloadStatus,
    started: Instant,
}

impl Drop for PreloadGuard<'_> {
    fn drop(&mut self) {
        self.status
            .last_preload
            .store(Utc::now().timestamp_millis(), Ordering::SeqCst);
        self.status.is_preloading.store(false, Ordering::SeqCst);
        info!(
            "Preload completed in {}ms",
            self.started.elapsed().as_millis()
        );
    }
}

impl PreloadStatus {
    fn scheduled_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.scheduled_task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl DataLoader {
    pub async fn preload_all_data(&self) -> PreloadOutcome {
        if self
            .status
            .is_preloading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Preload already in progress, skipping...");
            return PreloadOutcome::Skipped;
        }

        let _guard = PreloadGuard {
            status: &self.status,
            started: Instant::now(),
        };
        info!("Starting data preload for all pools...");

        match self.preload_pools().await {
            Ok((pools, failed_pools)) => {
                self.status.failed_attempts.store(0, Ordering::SeqCst);
                PreloadOutcome::Completed {
                    pools,
                    failed_pools,
                }
            },
            Err(e) => {
                error!("Error during data preload: {}", e);
                self.status.failed_attempts.fetch_add(1, Ordering::SeqCst);
                PreloadOutcome::Failed
            },
        }
    }

    async fn preload_pools(&self) -> Result<(usize, usize), Error> {
        let addresses = self.registry.addresses();
        let mut failed_pools = 0;

        for (index, pool_address) in addresses.iter().enumerate() {
            if index > 0 {
                time::sleep(self.settings.pool_delay).await;
            }

            match self.preload_pool(pool_address).await {
                Ok(()) => {
                    info!("Successfully preloaded data for pool {}", pool_address)
                },
                Err(e) => {
                    failed_pools += 1;
                    error!("Error preloading data for pool {}: {}", pool_address, e);
                },
            }
        }

        if !addresses.is_empty() && failed_pools == addresses.len() {
            return Err(Error::PreloadFailed(format!(
                "all {} pools failed",
                failed_pools
            )));
        }

        Ok((addresses.len(), failed_pools))
    }

    async fn preload_pool(&self, pool_address: &str) -> Result<(), Error> {
        let network = DEFAULT_NETWORK;

        // all six run to completion; any error marks the pool failed
        let (tvl, volume, fees, apr, liquidity, returns) = tokio::join!(
            self.get_tvl_history(pool_address, network),
            self.get_volume_history(pool_address, network),
            self.get_fees_history(pool_address, network),
            self.get_apr_history(pool_address, network),
            self.get_liquidity_distribution(pool_address, network),
            self.get_returns_breakdown(pool_address, network),
        );

        [
            tvl.map(drop),
            volume.map(drop),
            fees.map(drop),
            apr.map(drop),
            liquidity.map(drop),
            returns.map(drop),
        ]
        .into_iter()
        .collect::<Result<(), Error>>()
    }

    /// Replaces any running timer with one that preloads every interval.
    /// The first run happens one full interval from now.
    pub fn setup_periodic_updates(self: &Arc<Self>) {
        let period = self.settings.interval;
        let mut scheduled = self.status.scheduled_task();

        if let Some(previous) = scheduled.take() {
            previous.abort();
        }

        let loader = Arc::clone(self);
        *scheduled = Some(tokio::spawn(async move {
            let mut interval =
                time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                info!("Running scheduled cache update...");
                loader.preload_all_data().await;
            }
        }));

        info!(
            "Periodic cache updates scheduled every {} minutes",
            period.as_secs() / 60
        );
    }

    /// Returns false when no timer was running
    pub fn stop_periodic_updates(&self) -> bool {
        match self.status.scheduled_task().take() {
            Some(handle) => {
                handle.abort();
                info!("Periodic cache updates stopped");
                true
            },
            None => false,
        }
    }

    /// First preload after the startup delay, then the periodic timer
    pub fn init_data_loader(self: &Arc<Self>) -> JoinHandle<()> {
        let loader = Arc::clone(self);
        let handle = tokio::spawn(async move {
            time::sleep(loader.settings.startup_delay).await;
            loader.preload_all_data().await;
            loader.setup_periodic_updates();
        });

        info!("Data loader initialized");
        handle
    }

    /// Starts a run in the background unless one is active
    pub fn trigger_preload(self: &Arc<Self>) -> bool {
        if self.is_preloading() {
            return false;
        }

        let loader = Arc::clone(self);
        tokio::spawn(async move {
            loader.preload_all_data().await;
        });

        true
    }

    pub async fn status(&self) -> PreloadSnapshot {
        let scheduled = self
            .status
            .scheduled_task()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());

        PreloadSnapshot {
            is_preloading: self.is_preloading(),
            last_preload: self.last_preload(),
            failed_attempts: self.failed_attempts(),
            scheduled,
            cached_keys: self.cache.len().await,
        }
    }
}
