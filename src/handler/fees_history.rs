use tracing::info;

use crate::{
    cache::CacheTier,
    cache_keys::{build_pool_cache_key, FEES_HISTORY},
    error::Error,
    handler::DataLoader,
    helpers::generate_historical_data,
    model::{FeesPoint, Provenance},
};

const FEES_VARIATION_PERCENT: f64 = 25.0;
const FEES_MONTHS: usize = 12;

impl DataLoader {
    /// Twelve monthly points around the pool's configured fees baseline.
    /// Never calls upstream.
    pub async fn get_fees_history(
        &self,
        pool_address: &str,
        network: &str,
    ) -> Result<Vec<FeesPoint>, Error> {
        let key = build_pool_cache_key(FEES_HISTORY, pool_address, network);
        let profile = self.profile(pool_address);

        self.cache
            .fetch_with_cache(&key, CacheTier::HistoricalData.ttl(), || async {
                info!(
                    "Generating fees history for pool: {} on network: {}",
                    pool_address, network
                );

                let provenance = Provenance::APPROXIMATED;
                let data = generate_historical_data(
                    profile.base_fees,
                    FEES_VARIATION_PERCENT,
                    FEES_MONTHS,
                )
                .into_iter()
                .map(|(date, fees)| FeesPoint {
                    date,
                    fees,
                    real: provenance.real,
                    approximated: provenance.approximated,
                })
                .collect();

                Ok(data)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::handler::test_utils::{loader, FakePools, FakePrices, USDC_ETH, USDT_ETH};

    #[tokio::test]
    async fn test_twelve_months_around_base_fees() {
        let pools = FakePools::healthy();
        let loader = loader(FakePrices::new(None, None), pools.clone());

        let result = loader.get_fees_history(USDC_ETH, "ethereum").await.unwrap();

        assert_eq!(result.len(), 12);
        for point in &result {
            assert!((point.fees - 12_000_000.0).abs() <= 12_000_000.0 * 0.25);
            assert_eq!(point.approximated, Some(true));
            assert_eq!(point.real, Some(false));
        }
        assert_eq!(pools.tvl_calls.load(Ordering::SeqCst), 0);
        assert_eq!(pools.volume_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_base_fees_follow_registry() {
        let loader = loader(FakePrices::new(None, None), FakePools::healthy());

        let usdc = loader.get_fees_history(USDC_ETH, "ethereum").await.unwrap();
        let usdt = loader.get_fees_history(USDT_ETH, "ethereum").await.unwrap();

        let usdc_total: f64 = usdc.iter().map(|p| p.fees).sum();
        let usdt_total: f64 = usdt.iter().map(|p| p.fees).sum();
        assert!(usdt_total > usdc_total);
    }

    #[tokio::test]
    async fn test_any_network_is_accepted() {
        let loader = loader(FakePrices::new(None, None), FakePools::healthy());

        let result = loader.get_fees_history(USDC_ETH, "polygon").await.unwrap();
        assert_eq!(result.len(), 12);

        let key = build_pool_cache_key(FEES_HISTORY, USDC_ETH, "polygon");
        assert!(loader.cache().entry(&key).await.is_some());
    }
}
