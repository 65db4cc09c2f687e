//! Pool statistics served through the cache, and the preload scheduler
//! that keeps them warm.

mod apr_history;
mod data_loader;
mod distributions;
mod eth_price;
mod fees_history;
mod preload;
mod tvl_history;
mod volume_history;

#[cfg(test)]
pub(crate) mod test_utils;

pub use data_loader::{DataLoader, PreloadSettings, PreloadStatus};
pub use eth_price::DEFAULT_ETH_PRICE;
