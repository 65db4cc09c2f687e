use anyhow::Context as _;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::{
    configuration::Config,
    error::Error,
    provider::PriceProvider,
    types::{
        CoinGeckoPrice, EtherscanPrice, EtherscanPriceResponse, GraphQuery,
        GraphResponse, PoolDayData, PoolDayDatas,
    },
};

/// Days of history requested from the subgraph
pub const POOL_DAY_DATAS_WINDOW: i64 = 30;

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        Url::parse(&config.coingecko_url)?;
        Url::parse(&config.etherscan_url)?;
        Url::parse(&config.uniswap_graph_url)?;

        let http = match Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(Error::ReqwestError(e));
            },
        };

        Ok(HTTP { config, http })
    }

    pub async fn get_coingecko_eth_price(&self) -> Result<f64, Error> {
        let url = self.config.get_coingecko_eth_price_url();
        let json = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<CoinGeckoPrice>()
            .await?;

        json.get("ethereum")
            .and_then(|prices| prices.get("usd"))
            .copied()
            .filter(|price| *price > 0.0)
            .ok_or(Error::EmptyResponse(String::from("coingecko")))
    }

    pub async fn get_etherscan_eth_price(
        &self,
        api_key: &str,
    ) -> Result<f64, Error> {
        let url = self.config.get_etherscan_eth_price_url(api_key);
        let json = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<EtherscanPriceResponse>()
            .await?;

        parse_etherscan_price(json)
    }

    /// Last 30 daily snapshots of a pool, newest first
    pub async fn query_pool_day_datas(
        &self,
        pool_address: &str,
    ) -> Result<Vec<PoolDayData>, Error> {
        let start = Utc::now() - ChronoDuration::days(POOL_DAY_DATAS_WINDOW);
        let query = GraphQuery {
            query: pool_day_datas_query(pool_address, start.timestamp()),
        };
        debug!("Querying subgraph for pool {}", pool_address);

        let json = self
            .http
            .post(&self.config.uniswap_graph_url)
            .json(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<GraphResponse<PoolDayDatas>>()
            .await?;

        match json.data {
            Some(data) => Ok(data.pool_day_datas),
            None => Err(Error::EmptyResponse(String::from("uniswap subgraph"))),
        }
    }
}

#[async_trait]
impl PriceProvider for HTTP {
    async fn coingecko_eth_price(&self) -> Result<f64, Error> {
        self.get_coingecko_eth_price().await
    }

    async fn etherscan_eth_price(&self, api_key: &str) -> Result<f64, Error> {
        self.get_etherscan_eth_price(api_key).await
    }
}

fn parse_etherscan_price(json: EtherscanPriceResponse) -> Result<f64, Error> {
    if json.status != "1" {
        return Err(Error::UpstreamError {
            source_name: String::from("etherscan"),
            message: json.message,
        });
    }

    let price: EtherscanPrice = serde_json::from_value(json.result)?;
    let value = price
        .ethusd
        .parse::<f64>()
        .context("could not parse etherscan ethusd")?;

    Ok(value)
}

pub fn pool_day_datas_query(pool_address: &str, start_timestamp: i64) -> String {
    format!(
        r#"{{
  poolDayDatas(
    first: {},
    orderBy: date,
    orderDirection: desc,
    where: {{ pool: "{}", date_gt: {} }}
  ) {{
    date
    volumeUSD
    tvlUSD
    feesUSD
  }}
}}"#,
        POOL_DAY_DATAS_WINDOW,
        pool_address.to_lowercase(),
        start_timestamp
    )
}
