//! Data loader models
//!
//! Series and distribution payloads live in models.rs, pool classification
//! in pool.rs.

mod models;
mod pool;

pub use models::*;

pub use pool::{
    is_valid_pool_address, FeeTier, PoolProfile, PoolRegistry,
    DEFAULT_BASE_FEES, DEFAULT_BASE_VOLUME,
};
