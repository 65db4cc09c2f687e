use std::collections::HashMap;

/// `/simple/price` reply, e.g. `{ "ethereum": { "usd": 1599.24 } }`
pub type CoinGeckoPrice = HashMap<String, HashMap<String, f64>>;
