//! Payloads served by the data loader
//!
//! Everything here is serialized as-is into API responses and into the
//! cache, so field names are part of the public JSON shape.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_NETWORK: &str = "ethereum";

// =============================================================================
// NETWORK
// =============================================================================

/// Networks with real upstream data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Ethereum,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Ethereum => write!(f, "ethereum"),
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(value: &str) -> Result<Network, Self::Err> {
        match value {
            "ethereum" => Ok(Network::Ethereum),
            _ => Err(Error::UnsupportedNetwork(value.to_owned())),
        }
    }
}

// =============================================================================
// HISTORICAL SERIES
// =============================================================================

// Points taken from an upstream API carry no provenance flags. Synthetic
// points are always tagged `real: false, approximated: true`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Provenance {
    pub real: Option<bool>,
    pub approximated: Option<bool>,
}

impl Provenance {
    pub const UPSTREAM: Provenance = Provenance {
        real: None,
        approximated: None,
    };

    pub const APPROXIMATED: Provenance = Provenance {
        real: Some(false),
        approximated: Some(true),
    };
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TvlPoint {
    pub date: String,
    pub tvl: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximated: Option<bool>,
}

impl TvlPoint {
    pub fn new(date: String, tvl: f64) -> Self {
        Self {
            date,
            tvl,
            real: None,
            approximated: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VolumePoint {
    pub date: String,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximated: Option<bool>,
}

impl VolumePoint {
    pub fn new(
        date: String,
        volume: f64,
        fees: Option<f64>,
        provenance: Provenance,
    ) -> Self {
        Self {
            date,
            volume,
            fees,
            real: provenance.real,
            approximated: provenance.approximated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeesPoint {
    pub date: String,
    pub fees: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AprPoint {
    pub date: String,
    pub apr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximated: Option<bool>,
}

impl AprPoint {
    pub fn new(date: String, apr: f64, provenance: Provenance) -> Self {
        Self {
            date,
            apr,
            real: provenance.real,
            approximated: provenance.approximated,
        }
    }
}

// =============================================================================
// DISTRIBUTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LiquidityBucket {
    pub price: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReturnSource {
    pub source: String,
    pub percentage: u32,
}

// =============================================================================
// PRELOAD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloadSnapshot {
    pub is_preloading: bool,
    /// Milliseconds since epoch, 0 before the first run
    pub last_preload: i64,
    pub failed_attempts: u32,
    pub scheduled: bool,
    pub cached_keys: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// Another run was active
    Skipped,
    Completed { pools: usize, failed_pools: usize },
    Failed,
}
