use std::str::FromStr as _;

use tracing::{error, info};

use crate::{
    cache::CacheTier,
    cache_keys::{build_pool_cache_key, TVL_HISTORY},
    error::Error,
    handler::DataLoader,
    model::{Network, TvlPoint},
};

impl DataLoader {
    /// Only ethereum has real data; other networks are rejected before the
    /// cache is consulted.
    pub async fn get_tvl_history(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<TvlPoint>, Error> {
        Network::from_str(network)?;
        let key = build_pool_cache_key(TVL_HISTORY, pool_address, network);

        self.cache
            .fetch_with_cache(&key, CacheTier::HistoricalData.ttl(), || async {
                info!(
                    "Fetching real TVL history for pool: {} on network: {}",
                    pool_address, network
                );

                match self.pools.get_pool_tvl_history(pool_address).await {
                    Ok(result) => {
                        info!(
                            "Fetched TVL history with {} data points for pool: {}",
                            result.len(),
                            pool_address
                        );
                        Ok(result)
                    },
                    Err(e) => {
                        error!(
                            "Error fetching TVL history for pool {}: {}",
                            pool_address, e
                        );
                        Err(e)
                    },
                }
            })
            .await
    }
}
