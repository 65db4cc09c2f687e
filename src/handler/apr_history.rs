use std::str::FromStr as _;

use tracing::info;

use crate::{
    cache::CacheTier,
    cache_keys::{build_pool_cache_key, APR_HISTORY},
    error::Error,
    fallback::FallbackChain,
    handler::DataLoader,
    helpers::approximate_apr_series,
    model::{AprPoint, Network},
};

impl DataLoader {
    /// APR computed from the TVL and volume series, or an approximation
    /// around the fee tier's typical APR when that is not possible.
    pub async fn get_apr_history(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<AprPoint>, Error> {
        Network::from_str(network)?;
        let key = build_pool_cache_key(APR_HISTORY, pool_address, network);
        let profile = self.profile(pool_address);

        self.cache
            .fetch_with_cache(&key, CacheTier::HistoricalData.ttl(), || async {
                info!(
                    "Fetching real APR history for pool: {} on network: {}",
                    pool_address, network
                );

                FallbackChain::new(format!("apr history {}", pool_address))
                    .then("computed", async {
                        let tvl = self.get_tvl_history(pool_address, network).await?;
                        let volume =
                            self.get_volume_history(pool_address, network).await?;
                        let apr = self
                            .pools
                            .calculate_pool_apr(pool_address, tvl, volume)
                            .await?;

                        if apr.is_empty() {
                            return Err(Error::EmptyResponse(format!(
                                "APR series for pool {}",
                                pool_address
                            )));
                        }

                        info!(
                            "Computed {} APR data points for pool: {}",
                            apr.len(),
                            pool_address
                        );
                        Ok(apr)
                    })
                    .then("fee tier", async {
                        let base_apr = profile.fee_tier.base_apr();
                        info!(
                            "Using backup APR calculation with base {}% for pool {}",
                            base_apr, pool_address
                        );
                        Ok(approximate_apr_series(base_apr))
                    })
                    .run()
                    .await
            })
            .await
    }
}
