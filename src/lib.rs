//! # options-quote
//!
//! Option quotes for the nearest weekly expiration, expressed relative to the
//! underlying: each contract's strike offset from spot and its bid/ask
//! premium as a percentage of strike.
//!
//! ## Features
//!
//! - Next-Friday expiration resolution and validation
//! - Strike offset and premium/strike ratios with inclusive range filtering
//! - Alpaca Markets REST provider behind a `MarketDataProvider` trait
//! - PNG charts of the filtered quotes
//! - Form settings with defaults and JSON persistence
//! - Environment-based configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use options_quote::api::RestClient;
//! use options_quote::config::Config;
//! use options_quote::cycle::run_cycle;
//! use options_quote::settings::Settings;
//! use options_quote::utils::plot_option_quotes;
//!
//! #[tokio::main]
//! async fn main() -> options_quote::error::Result<()> {
//!     let config = Config::from_env()?;
//!     config.init_logging()?;
//!
//!     let provider = RestClient::new(config.alpaca.clone());
//!     let settings = Settings::default().clamped()?;
//!
//!     let report = run_cycle(&provider, &settings).await?;
//!     for put in &report.puts {
//!         println!(
//!             "{:>8.2} {:>7.2}% bid {:.3}% ask {:.3}%",
//!             put.strike(),
//!             put.incremental_percentage,
//!             put.bid_ratio,
//!             put.ask_ratio
//!         );
//!     }
//!
//!     plot_option_quotes(&report, settings.plot_puts, settings.plot_calls, "quotes.png")?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cycle;
pub mod error;
pub mod expiration;
pub mod metrics;
pub mod models;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use api::{MarketDataProvider, RestClient, StaticProvider};
pub use config::Config;
pub use cycle::{run_cycle, QuoteReport};
pub use error::{QuoteError, Result};
pub use expiration::{resolve_next_friday, validate_expiration};
pub use metrics::enrich_and_filter;
pub use settings::Settings;
