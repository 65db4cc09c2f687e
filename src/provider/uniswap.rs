use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::Error,
    helpers::round_to,
    model::{AprPoint, Provenance, TvlPoint, VolumePoint},
    provider::{PoolDataSource, HTTP},
    types::PoolDayData,
};

/// Fee rate assumed when a volume point carries no fees
const DEFAULT_FEE_RATE: f64 = 0.003;

/// Pool history backed by the Uniswap v3 subgraph
#[derive(Debug)]
pub struct UniswapSubgraph {
    http: Arc<HTTP>,
}

impl UniswapSubgraph {
    pub fn new(http: Arc<HTTP>) -> Self {
        Self { http }
    }

    async fn day_datas(&self, pool_address: &str) -> Result<Vec<PoolDayData>, Error> {
        let mut datas = self.http.query_pool_day_datas(pool_address).await?;

        if datas.is_empty() {
            return Err(Error::EmptyResponse(format!(
                "uniswap subgraph for pool {}",
                pool_address
            )));
        }

        // subgraph answers newest first
        datas.reverse();
        Ok(datas)
    }
}

#[async_trait]
impl PoolDataSource for UniswapSubgraph {
    async fn get_pool_tvl_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<TvlPoint>, Error> {
        let datas = self.day_datas(pool_address).await?;
        let points = datas
            .iter()
            .map(|day| -> Result<TvlPoint, Error> {
                Ok(TvlPoint::new(format_day(day.date)?, day.tvl_usd.parse()?))
            })
            .collect::<Result<Vec<TvlPoint>, Error>>()?;

        info!(
            "Fetched {} TVL points from subgraph for pool {}",
            points.len(),
            pool_address
        );
        Ok(points)
    }

    async fn get_pool_volume_history(
        &self,
        pool_address: &str,
    ) -> Result<Vec<VolumePoint>, Error> {
        let datas = self.day_datas(pool_address).await?;
        let points = datas
            .iter()
            .map(|day| -> Result<VolumePoint, Error> {
                Ok(VolumePoint::new(
                    format_day(day.date)?,
                    day.volume_usd.parse()?,
                    Some(day.fees_usd.parse()?),
                    Provenance::UPSTREAM,
                ))
            })
            .collect::<Result<Vec<VolumePoint>, Error>>()?;

        info!(
            "Fetched {} volume points from subgraph for pool {}",
            points.len(),
            pool_address
        );
        Ok(points)
    }

    async fn calculate_pool_apr(
        &self,
        pool_address: &str,
        tvl: Vec<TvlPoint>,
        volume: Vec<VolumePoint>,
    ) -> Result<Vec<AprPoint>, Error> {
        let tvl = if tvl.is_empty() {
            self.get_pool_tvl_history(pool_address).await?
        } else {
            tvl
        };
        let volume = if volume.is_empty() {
            self.get_pool_volume_history(pool_address).await?
        } else {
            volume
        };

        let points = calculate_apr(&tvl, &volume);

        if points.is_empty() {
            return Err(Error::EmptyResponse(format!(
                "APR series for pool {}",
                pool_address
            )));
        }

        Ok(points)
    }
}

/// Pairs TVL and volume points by position. APR is
/// `daily fees * 365 / tvl * 100`, two decimals. Points derived from
/// approximated volume stay approximated.
pub fn calculate_apr(tvl: &[TvlPoint], volume: &[VolumePoint]) -> Vec<AprPoint> {
    tvl.iter()
        .zip(volume.iter())
        .map(|(t, v)| {
            let daily_fees = v.fees.unwrap_or(v.volume * DEFAULT_FEE_RATE);
            let apr = if t.tvl > 0.0 {
                daily_fees * 365.0 / t.tvl * 100.0
            } else {
                0.0
            };

            let provenance = if v.approximated == Some(true) {
                Provenance::APPROXIMATED
            } else {
                Provenance::UPSTREAM
            };

            AprPoint::new(t.date.to_owned(), round_to(apr, 2), provenance)
        })
        .collect()
}

fn format_day(timestamp: i64) -> Result<String, Error> {
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
        Error::EmptyResponse(format!("invalid subgraph date {}", timestamp))
    })?;

    Ok(date.format("%Y-%m-%d").to_string())
}
