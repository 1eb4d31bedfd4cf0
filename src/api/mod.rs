//! Market-data providers
//!
//! The quote cycle only needs three things from upstream: the published
//! expiration dates, one expiration's chain, and the latest close. Anything
//! that can answer those implements [`MarketDataProvider`].

mod rest;
mod static_provider;

pub use rest::RestClient;
pub use static_provider::StaticProvider;

use crate::error::Result;
use crate::models::OptionChain;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Published expiration dates for `ticker`, as `YYYY-MM-DD` strings.
    async fn expirations(&self, ticker: &str) -> Result<Vec<String>>;

    /// Calls and puts for one expiration.
    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain>;

    /// Most recent daily close of the underlying.
    async fn last_close(&self, ticker: &str) -> Result<f64>;
}
