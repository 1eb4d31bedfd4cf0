use crate::error::{QuoteError, Result};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;

/// Configuration for the Alpaca market-data provider
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaConfig {
    /// Alpaca API key
    pub api_key: String,
    /// Alpaca API secret
    pub api_secret: String,
    /// Trading API base URL (serves the option contract listings)
    pub trading_url: String,
    /// Market data API base URL
    pub data_url: String,
    /// Options data feed (`indicative` or `opra`)
    pub feed: String,
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Alpaca API configuration
    pub alpaca: AlpacaConfig,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let default_log_level = "info".to_string();
        let default_trading_url = "https://paper-api.alpaca.markets".to_string();
        let default_data_url = "https://data.alpaca.markets".to_string();
        let default_feed = "indicative".to_string();

        let api_key = env::var("ALPACA_API_KEY").map_err(|_| {
            QuoteError::ConfigError("ALPACA_API_KEY environment variable not set".to_string())
        })?;

        let api_secret = env::var("ALPACA_API_SECRET").map_err(|_| {
            QuoteError::ConfigError("ALPACA_API_SECRET environment variable not set".to_string())
        })?;

        let trading_url = env::var("ALPACA_TRADING_URL").unwrap_or(default_trading_url);
        let data_url = env::var("ALPACA_DATA_URL").unwrap_or(default_data_url);
        let feed = env::var("ALPACA_FEED").unwrap_or(default_feed);
        let log_level = env::var("LOG_LEVEL").unwrap_or(default_log_level);

        Ok(Config {
            alpaca: AlpacaConfig {
                api_key,
                api_secret,
                trading_url,
                data_url,
                feed,
            },
            log_level,
        })
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        init_logging(&self.log_level)
    }
}

/// Install the global `tracing` subscriber; `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| QuoteError::ConfigError(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
