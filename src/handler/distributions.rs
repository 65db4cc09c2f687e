use tracing::info;

use crate::{
    cache::CacheTier,
    cache_keys::{build_pool_cache_key, LIQUIDITY_DISTRIBUTION, RETURNS_BREAKDOWN},
    error::Error,
    handler::DataLoader,
    model::{LiquidityBucket, ReturnSource},
};

const LIQUIDITY_BUCKETS: [(&str, u32); 10] = [
    ("0.0003125-0.0003750", 5),
    ("0.0003750-0.0004375", 7),
    ("0.0004375-0.0005000", 11),
    ("0.0005000-0.0005625", 13),
    ("0.0005625-0.0006250", 18),
    ("0.0006250-0.0006875", 17),
    ("0.0006875-0.0007500", 14),
    ("0.0007500-0.0008125", 8),
    ("0.0008125-0.0008750", 4),
    ("0.0008750-0.0009375", 3),
];

const RETURN_SOURCES: [(&str, u32); 4] = [
    ("Fees", 65),
    ("Price Impact", 15),
    ("Incentives", 10),
    ("Others", 10),
];

impl DataLoader {
    pub async fn get_liquidity_distribution(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<LiquidityBucket>, Error> {
        let key =
            build_pool_cache_key(LIQUIDITY_DISTRIBUTION, pool_address, network);

        self.cache
            .fetch_with_cache(&key, CacheTier::StaticData.ttl(), || async {
                info!(
                    "Generating liquidity distribution for pool: {} on network: {}",
                    pool_address, network
                );

                Ok(LIQUIDITY_BUCKETS
                    .iter()
                    .map(|(price, percentage)| LiquidityBucket {
                        price: price.to_string(),
                        percentage: *percentage,
                    })
                    .collect())
            })
            .await
    }

    pub async fn get_returns_breakdown(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<ReturnSource>, Error> {
        let key = build_pool_cache_key(RETURNS_BREAKDOWN, pool_address, network);

        self.cache
            .fetch_with_cache(&key, CacheTier::StaticData.ttl(), || async {
                info!(
                    "Generating returns breakdown for pool: {} on network: {}",
                    pool_address, network
                );

                Ok(RETURN_SOURCES
                    .iter()
                    .map(|(source, percentage)| ReturnSource {
                        source: source.to_string(),
                        percentage: *percentage,
                    })
                    .collect())
            })
            .await
    }
}
