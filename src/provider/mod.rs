use async_trait::async_trait;

use crate::{
    error::Error,
    model::{AprPoint, TvlPoint, VolumePoint},
};

pub use self::{
    http::HTTP,
    uniswap::{calculate_apr, UniswapSubgraph},
};

mod http;
mod uniswap;

/// ETH/USD price feeds, one method per upstream
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn coingecko_eth_price(&self) -> Result<f64, Error>;

    async fn etherscan_eth_price(&self, api_key: &str) -> Result<f64, Error>;
}

/// Pool history collaborator
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    async fn get_pool_tvl_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<TvlPoint>, Error>;

    async fn get_pool_volume_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<VolumePoint>, Error>;

    /// Empty inputs are fetched by the source itself
    async fn calculate_pool_apr(
        &self,
        pool_address: &str,
        tvl: Vec<TvlPoint>,
        volume: Vec<VolumePoint>,
    ) -> Result<Vec<AprPoint>, Error>;
}
