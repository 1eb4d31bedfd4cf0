use super::MarketDataProvider;
use crate::error::{QuoteError, Result};
use crate::expiration::format_expiration;
use crate::models::OptionChain;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Listing {
    expirations: Vec<String>,
    chains: HashMap<NaiveDate, OptionChain>,
    close: Option<f64>,
}

/// In-memory provider serving fixed chains, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    listings: HashMap<String, Listing>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain; its expiration is added to the ticker's published dates.
    pub fn with_chain(mut self, chain: OptionChain) -> Self {
        let listing = self.listings.entry(chain.symbol.clone()).or_default();
        let date = format_expiration(chain.expiration);
        if !listing.expirations.contains(&date) {
            listing.expirations.push(date);
            listing.expirations.sort();
        }
        listing.chains.insert(chain.expiration, chain);
        self
    }

    /// Publish an expiration date without a chain behind it.
    pub fn with_expiration(mut self, ticker: &str, date: &str) -> Self {
        let listing = self.listings.entry(ticker.to_string()).or_default();
        if !listing.expirations.iter().any(|d| d == date) {
            listing.expirations.push(date.to_string());
            listing.expirations.sort();
        }
        self
    }

    pub fn with_close(mut self, ticker: &str, close: f64) -> Self {
        self.listings.entry(ticker.to_string()).or_default().close = Some(close);
        self
    }

    fn listing(&self, ticker: &str) -> Result<&Listing> {
        self.listings
            .get(ticker)
            .ok_or_else(|| QuoteError::UpstreamFetch(format!("unknown ticker {}", ticker)))
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn expirations(&self, ticker: &str) -> Result<Vec<String>> {
        let listing = self.listing(ticker)?;
        if listing.expirations.is_empty() {
            return Err(QuoteError::UpstreamFetch(format!("no options listed for {}", ticker)));
        }
        Ok(listing.expirations.clone())
    }

    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain> {
        self.listing(ticker)?
            .chains
            .get(&expiration)
            .cloned()
            .ok_or_else(|| {
                QuoteError::UpstreamFetch(format!(
                    "empty option chain for {} expiring {}",
                    ticker, expiration
                ))
            })
    }

    async fn last_close(&self, ticker: &str) -> Result<f64> {
        self.listing(ticker)?
            .close
            .ok_or_else(|| QuoteError::UpstreamFetch(format!("no daily close available for {}", ticker)))
    }
}
