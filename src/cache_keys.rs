//! Centralized cache key templates
//!
//! Every domain fetcher and the preload scheduler go through these helpers
//! so that warmed entries are the ones request handlers read.

pub const ETH_PRICE: &str = "eth-price";

pub const TVL_HISTORY: &str = "tvl-history";
pub const VOLUME_HISTORY: &str = "volume-history";
pub const FEES_HISTORY: &str = "fees-history";
pub const APR_HISTORY: &str = "apr-history";
pub const LIQUIDITY_DISTRIBUTION: &str = "liquidity-distribution";
pub const RETURNS_BREAKDOWN: &str = "returns-breakdown";

/// Build a pool scoped key: "<endpoint>-<poolAddress>-<network>"
pub fn build_pool_cache_key(
    endpoint: &str,
    pool_address: &str,
    network: &str,
) -> String {
    format!("{}-{}-{}", endpoint, pool_address, network)
}
