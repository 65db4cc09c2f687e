//! In-memory collaborators for data loader tests

use std::{
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    configuration::Config,
    error::Error,
    handler::{DataLoader, PreloadSettings},
    helpers::daily_dates,
    model::{
        AprPoint, FeeTier, PoolProfile, PoolRegistry, Provenance, TvlPoint,
        VolumePoint,
    },
    provider::{calculate_apr, PoolDataSource, PriceProvider},
};

pub const USDC_ETH: &str = "0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640";
pub const USDT_ETH: &str = "0x4e68ccd3e89f51c3074ca5072bbac773960dfa36";

pub struct FakePrices {
    coingecko: Option<f64>,
    etherscan: Option<f64>,
    pub coingecko_calls: AtomicU32,
    pub etherscan_calls: AtomicU32,
}

impl FakePrices {
    pub fn new(coingecko: Option<f64>, etherscan: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            coingecko,
            etherscan,
            coingecko_calls: AtomicU32::new(0),
            etherscan_calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl PriceProvider for FakePrices {
    async fn coingecko_eth_price(&self) -> Result<f64, Error> {
        self.coingecko_calls.fetch_add(1, Ordering::SeqCst);
        self.coingecko
            .ok_or(Error::EmptyResponse(String::from("coingecko")))
    }

    async fn etherscan_eth_price(&self, _api_key: &str) -> Result<f64, Error> {
        self.etherscan_calls.fetch_add(1, Ordering::SeqCst);
        self.etherscan.ok_or(Error::UpstreamError {
            source_name: String::from("etherscan"),
            message: String::from("NOTOK"),
        })
    }
}

/// `None` series make the matching call fail, as does any call for
/// `failing_pool`
pub struct FakePools {
    pub tvl: Option<Vec<TvlPoint>>,
    pub volume: Option<Vec<VolumePoint>>,
    pub failing_pool: Option<&'static str>,
    pub apr_fails: bool,
    pub delay: Duration,
    pub tvl_calls: AtomicU32,
    pub volume_calls: AtomicU32,
    pub apr_calls: AtomicU32,
}

impl FakePools {
    pub fn new(
        tvl: Option<Vec<TvlPoint>>,
        volume: Option<Vec<VolumePoint>>,
    ) -> Self {
        Self {
            tvl,
            volume,
            failing_pool: None,
            apr_fails: false,
            delay: Duration::ZERO,
            tvl_calls: AtomicU32::new(0),
            volume_calls: AtomicU32::new(0),
            apr_calls: AtomicU32::new(0),
        }
    }

    pub fn healthy() -> Arc<Self> {
        Arc::new(Self::new(
            Some(tvl_series(10_000_000.0)),
            Some(volume_series(1_000_000.0)),
        ))
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::new(None, None))
    }

    fn serves(&self, pool_address: &str) -> bool {
        self.failing_pool
            .map_or(true, |failing| !failing.eq_ignore_ascii_case(pool_address))
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl PoolDataSource for FakePools {
    async fn get_pool_tvl_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<TvlPoint>, Error> {
        self.tvl_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.tvl
            .clone()
            .filter(|_| self.serves(pool_address))
            .ok_or(Error::EmptyResponse(String::from("tvl service")))
    }

    async fn get_pool_volume_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<VolumePoint>, Error> {
        self.volume_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.volume
            .clone()
            .filter(|_| self.serves(pool_address))
            .ok_or(Error::EmptyResponse(String::from("volume service")))
    }

    async fn calculate_pool_apr(
        &self,
        _pool_address: &str,
        tvl: Vec<TvlPoint>,
        volume: Vec<VolumePoint>,
    ) -> Result<Vec<AprPoint>, Error> {
        self.apr_calls.fetch_add(1, Ordering::SeqCst);

        if self.apr_fails {
            return Err(Error::EmptyResponse(String::from("apr service")));
        }

        Ok(calculate_apr(&tvl, &volume))
    }
}

pub fn tvl_series(value: f64) -> Vec<TvlPoint> {
    daily_dates(30)
        .into_iter()
        .map(|date| TvlPoint::new(date, value))
        .collect()
}

pub fn volume_series(value: f64) -> Vec<VolumePoint> {
    daily_dates(30)
        .into_iter()
        .map(|date| {
            VolumePoint::new(date, value, Some(value * 0.0005), Provenance::UPSTREAM)
        })
        .collect()
}

pub fn registry() -> PoolRegistry {
    PoolRegistry::new(registry_profiles())
}

fn registry_profiles() -> Vec<PoolProfile> {
    vec![
        PoolProfile {
            address: USDC_ETH.to_owned(),
            fee_tier: FeeTier::Lowest,
            base_volume: 15_000_000.0,
            base_fees: 12_000_000.0,
        },
        PoolProfile {
            address: USDT_ETH.to_owned(),
            fee_tier: FeeTier::Medium,
            base_volume: 5_000_000.0,
            base_fees: 15_000_000.0,
        },
    ]
}

pub fn settings() -> PreloadSettings {
    PreloadSettings {
        interval: Duration::from_secs(600),
        startup_delay: Duration::from_millis(2000),
        pool_delay: Duration::from_millis(300),
    }
}

pub fn loader(
    prices: Arc<FakePrices>,
    pools: Arc<FakePools>,
) -> Arc<DataLoader> {
    Arc::new(DataLoader::new(prices, pools, registry(), settings()))
}

pub fn config() -> Config {
    Config {
        server_host: String::from("127.0.0.1"),
        port: 8080,
        allowed_origins: vec![String::from("*")],
        etherscan_api_key: String::from("KEY"),
        coingecko_url: String::from("https://api.coingecko.com"),
        etherscan_url: String::from("https://api.etherscan.io/api"),
        uniswap_graph_url: String::from("https://graph.example"),
        http_timeout: 10,
        preload_pools: registry_profiles(),
        preload_interval: 10,
        preload_startup_delay: 2000,
        preload_pool_delay: 300,
        enable_preload: false,
    }
}
