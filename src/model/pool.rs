use std::{collections::HashMap, fmt, str::FromStr};

use crate::error::Error;

pub const DEFAULT_BASE_VOLUME: f64 = 5_000_000.0;
pub const DEFAULT_BASE_FEES: f64 = 15_000_000.0;

/// Uniswap v3 fee tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeTier {
    /// 0.05%
    Lowest,
    /// 0.3%
    #[default]
    Medium,
    /// 1%
    High,
}

impl FeeTier {
    pub fn rate(&self) -> f64 {
        match self {
            FeeTier::Lowest => 0.0005,
            FeeTier::Medium => 0.003,
            FeeTier::High => 0.01,
        }
    }

    /// Typical daily volume as a share of TVL
    pub fn volume_ratio(&self) -> f64 {
        match self {
            FeeTier::Lowest => 0.15,
            FeeTier::Medium => 0.1,
            FeeTier::High => 0.05,
        }
    }

    /// Typical APR in percent
    pub fn base_apr(&self) -> f64 {
        match self {
            FeeTier::Lowest => 4.2,
            FeeTier::Medium => 8.5,
            FeeTier::High => 15.7,
        }
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeeTier::Lowest => write!(f, "0.0005"),
            FeeTier::Medium => write!(f, "0.003"),
            FeeTier::High => write!(f, "0.01"),
        }
    }
}

impl FromStr for FeeTier {
    type Err = Error;

    fn from_str(value: &str) -> Result<FeeTier, Self::Err> {
        match value.trim() {
            "0.0005" => Ok(FeeTier::Lowest),
            "0.003" => Ok(FeeTier::Medium),
            "0.01" => Ok(FeeTier::High),
            other => Err(Error::ConfigurationError(format!(
                "Fee tier {} not supported",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolProfile {
    pub address: String,
    pub fee_tier: FeeTier,
    /// Daily volume used when neither the subgraph nor TVL is available
    pub base_volume: f64,
    /// Monthly fees baseline for the synthetic fees history
    pub base_fees: f64,
}

impl PoolProfile {
    pub fn unknown(address: &str) -> Self {
        Self {
            address: address.to_owned(),
            fee_tier: FeeTier::default(),
            base_volume: DEFAULT_BASE_VOLUME,
            base_fees: DEFAULT_BASE_FEES,
        }
    }
}

/// Configured pools, looked up by case-insensitive address
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: Vec<PoolProfile>,
    by_address: HashMap<String, usize>,
}

impl PoolRegistry {
    pub fn new(pools: Vec<PoolProfile>) -> Self {
        let mut by_address = HashMap::new();

        for (index, pool) in pools.iter().enumerate() {
            by_address.insert(pool.address.to_lowercase(), index);
        }

        Self { pools, by_address }
    }

    /// Unknown addresses get the default profile
    pub fn profile(&self, address: &str) -> PoolProfile {
        match self.by_address.get(&address.to_lowercase()) {
            Some(index) => self.pools[*index].clone(),
            None => PoolProfile::unknown(address),
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.by_address.contains_key(&address.to_lowercase())
    }

    /// Addresses in configuration order
    pub fn addresses(&self) -> Vec<String> {
        self.pools.iter().map(|p| p.address.to_owned()).collect()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// `0x` followed by 40 hex digits
pub fn is_valid_pool_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
