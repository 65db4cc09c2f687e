use tracing::info;

use crate::{
    cache::CacheTier, cache_keys, error::Error, fallback::FallbackChain,
    handler::DataLoader,
};

/// Served when every price feed is down
pub const DEFAULT_ETH_PRICE: f64 = 1599.24;

impl DataLoader {
    /// ETH/USD from CoinGecko, then Etherscan, then a fixed default
    pub async fn get_eth_price(&self, api_key: &str) -> Result<f64, Error> {
        self.cache
            .fetch_with_cache(
                cache_keys::ETH_PRICE,
                CacheTier::EthPrice.ttl(),
                || async {
                    let price = FallbackChain::new("eth price")
                        .then("coingecko", self.prices.coingecko_eth_price())
                        .then(
                            "etherscan",
                            self.prices.etherscan_eth_price(api_key),
                        )
                        .then("default", async { Ok(DEFAULT_ETH_PRICE) })
                        .run()
                        .await?;

                    info!("ETH price: ${}", price);
                    Ok(price)
                },
            )
            .await
    }
}
