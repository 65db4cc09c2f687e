use std::{env, fs, ops::Deref, path::Path, sync::Arc, time::Duration};

use crate::{
    error::Error,
    handler::{DataLoader, PreloadSettings},
    helpers::parse_tuple_string,
    model::{FeeTier, PoolProfile, PoolRegistry},
    provider::{UniswapSubgraph, HTTP},
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub data_loader: Arc<DataLoader>,
}

impl State {
    pub fn new(config: Config, http: HTTP) -> State {
        let http = Arc::new(http);
        let subgraph = Arc::new(UniswapSubgraph::new(http.clone()));
        let registry = PoolRegistry::new(config.preload_pools.clone());

        let data_loader = DataLoader::new(
            http,
            subgraph,
            registry,
            config.preload_settings(),
        );

        Self {
            config,
            data_loader: Arc::new(data_loader),
        }
    }

    pub fn from_loader(config: Config, data_loader: Arc<DataLoader>) -> State {
        Self {
            config,
            data_loader,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub etherscan_api_key: String,
    pub coingecko_url: String,
    pub etherscan_url: String,
    pub uniswap_graph_url: String,
    pub http_timeout: u64,
    pub preload_pools: Vec<PoolProfile>,
    pub preload_interval: u64,
    pub preload_startup_delay: u64,
    pub preload_pool_delay: u64,
    pub enable_preload: bool,
}

impl Config {
    pub fn preload_settings(&self) -> PreloadSettings {
        PreloadSettings {
            interval: Duration::from_secs(self.preload_interval * 60),
            startup_delay: Duration::from_millis(self.preload_startup_delay),
            pool_delay: Duration::from_millis(self.preload_pool_delay),
        }
    }

    pub fn get_coingecko_eth_price_url(&self) -> String {
        format!(
            "{}/api/v3/simple/price?ids=ethereum&vs_currencies=usd",
            self.coingecko_url
        )
    }

    pub fn get_etherscan_eth_price_url(&self, api_key: &str) -> String {
        format!(
            "{}?module=stats&action=ethprice&apikey={}",
            self.etherscan_url, api_key
        )
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.trim().to_owned())
        .collect::<Vec<String>>();

    // secrets live in the optional .env file
    let etherscan_api_key = env::var("ETHERSCAN_API_KEY").unwrap_or_default();

    let coingecko_url = env::var("COINGECKO_URL")?;
    let etherscan_url = env::var("ETHERSCAN_URL")?;
    let uniswap_graph_url = env::var("UNISWAP_GRAPH_URL")?;
    let http_timeout = env::var("HTTP_TIMEOUT_IN_SEC")?.parse()?;

    let preload_pools = parse_pool_profiles(env::var("PRELOAD_POOLS")?)?;
    let preload_interval = env::var("PRELOAD_INTERVAL_IN_MINUTES")?.parse()?;
    let preload_startup_delay =
        env::var("PRELOAD_STARTUP_DELAY_IN_MS")?.parse()?;
    let preload_pool_delay = env::var("PRELOAD_POOL_DELAY_IN_MS")?.parse()?;
    let enable_preload = env::var("ENABLE_PRELOAD")?.parse()?;

    let config = Config {
        server_host,
        port,
        allowed_origins,
        etherscan_api_key,
        coingecko_url,
        etherscan_url,
        uniswap_graph_url,
        http_timeout,
        preload_pools,
        preload_interval,
        preload_startup_delay,
        preload_pool_delay,
        enable_preload,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = "waybank.conf";
    let secrets_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let config_path = format!("{}/{}", directory, config_file);
    let secrets_path = format!("{}/{}", directory, secrets_file);

    let config_string = fs::read_to_string(config_path)?;
    apply_config_string(&config_string);

    if Path::new(&secrets_path).exists() {
        let secrets_string = fs::read_to_string(secrets_path)?;
        apply_config_string(&secrets_string);
    }

    Ok(())
}

fn apply_config_string(config: &str) {
    for (key, value) in parse_config_string(config) {
        env::set_var(key, value);
    }
}

fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            line.split_once('=').map(|(k, v)| {
                (k.trim().to_owned(), v.trim().to_owned())
            })
        })
        .collect()
}

/// "(address,fee_tier,base_volume,base_fees),(...)"
fn parse_pool_profiles(data: String) -> Result<Vec<PoolProfile>, Error> {
    let mut pools: Vec<PoolProfile> = Vec::new();

    for item in parse_tuple_string(data) {
        let items: Vec<&str> = item.split(',').map(str::trim).collect();

        if items.len() != 4 {
            return Err(Error::ConfigurationError(format!(
                "PRELOAD_POOLS entry ({}) must have 4 fields",
                item
            )));
        }

        pools.push(PoolProfile {
            address: items[0].to_owned(),
            fee_tier: items[1].parse::<FeeTier>()?,
            base_volume: items[2].parse()?,
            base_fees: items[3].parse()?,
        });
    }

    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_string_skips_comments() {
        let parsed = parse_config_string(
            "# server\nSERVER_HOST=0.0.0.0\n\nPORT = 8080\nBROKEN LINE\nURL=https://x.io/?a=b\n",
        );
        assert_eq!(
            parsed,
            vec![
                (String::from("SERVER_HOST"), String::from("0.0.0.0")),
                (String::from("PORT"), String::from("8080")),
                (String::from("URL"), String::from("https://x.io/?a=b")),
            ]
        );
    }

    #[test]
    fn test_parse_pool_profiles() {
        let pools = parse_pool_profiles(String::from(
            "(0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640,0.0005,15000000,12000000),(0x4e68ccd3e89f51c3074ca5072bbac773960dfa36,0.003,5000000,15000000)",
        ))
        .unwrap();

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].fee_tier, FeeTier::Lowest);
        assert_eq!(pools[0].base_fees, 12_000_000.0);
        assert_eq!(pools[1].address, "0x4e68ccd3e89f51c3074ca5072bbac773960dfa36");
        assert_eq!(pools[1].fee_tier, FeeTier::Medium);
    }

    #[test]
    fn test_parse_pool_profiles_rejects_bad_entries() {
        assert!(parse_pool_profiles(String::from("(0xabc,0.0005)")).is_err());
        assert!(parse_pool_profiles(String::from("(0xabc,0.07,1,1)")).is_err());
        assert!(parse_pool_profiles(String::from("(0xabc,0.003,lots,1)")).is_err());
    }

    #[test]
    fn test_preload_settings() {
        let config = Config {
            server_host: String::from("127.0.0.1"),
            port: 8080,
            allowed_origins: vec![String::from("*")],
            etherscan_api_key: String::new(),
            coingecko_url: String::from("https://api.coingecko.com"),
            etherscan_url: String::from("https://api.etherscan.io/api"),
            uniswap_graph_url: String::from("https://graph.example"),
            http_timeout: 10,
            preload_pools: vec![],
            preload_interval: 10,
            preload_startup_delay: 2000,
            preload_pool_delay: 300,
            enable_preload: true,
        };

        let settings = config.preload_settings();
        assert_eq!(settings.interval, Duration::from_secs(600));
        assert_eq!(settings.startup_delay, Duration::from_millis(2000));
        assert_eq!(settings.pool_delay, Duration::from_millis(300));
        assert_eq!(
            config.get_etherscan_eth_price_url("KEY"),
            "https://api.etherscan.io/api?module=stats&action=ethprice&apikey=KEY"
        );
        assert_eq!(
            config.get_coingecko_eth_price_url(),
            "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd"
        );
    }
}
