use serde::Deserialize;
use serde_json::Value;

/// `module=stats&action=ethprice` reply. On failure `result` is a plain
/// string explaining the error, so it is decoded lazily.
#[derive(Debug, Deserialize)]
pub struct EtherscanPriceResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: Value,
}

#[derive(Debug, Deserialize)]
pub struct EtherscanPrice {
    pub ethusd: String,
}
