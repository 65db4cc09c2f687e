//! API Controller modules
//!
//! Controllers grouped by domain.

pub mod pools;
pub mod preload;
pub mod prices;
