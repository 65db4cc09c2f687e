pub use self::{
    coin_gecko_price::CoinGeckoPrice,
    etherscan_price::{EtherscanPrice, EtherscanPriceResponse},
    pool_day_data::{GraphQuery, GraphResponse, PoolDayData, PoolDayDatas},
};

mod coin_gecko_price;
mod etherscan_price;
mod pool_day_data;
