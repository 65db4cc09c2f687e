use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GraphQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphResponse<T> {
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct PoolDayDatas {
    #[serde(rename = "poolDayDatas", default)]
    pub pool_day_datas: Vec<PoolDayData>,
}

/// Subgraph decimals are encoded as strings
#[derive(Debug, Deserialize, Clone)]
pub struct PoolDayData {
    pub date: i64,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: String,
    #[serde(rename = "tvlUSD")]
    pub tvl_usd: String,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
}
