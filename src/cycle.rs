//! One fetch -> resolve -> validate -> enrich/filter pass

use crate::api::MarketDataProvider;
use crate::error::Result;
use crate::expiration::{parse_expiration_dates, resolve_next_friday, validate_expiration};
use crate::metrics::enrich_and_filter;
use crate::models::EnrichedContract;
use crate::settings::Settings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Filtered, enriched quotes for one ticker and expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteReport {
    pub symbol: String,
    pub expiration: NaiveDate,
    pub spot_price: f64,
    pub puts: Vec<EnrichedContract>,
    pub calls: Vec<EnrichedContract>,
}

/// Run a single quote cycle for `settings`.
///
/// The first failure aborts the cycle; nothing is retried.
pub async fn run_cycle<P>(provider: &P, settings: &Settings) -> Result<QuoteReport>
where
    P: MarketDataProvider + ?Sized,
{
    let ticker = settings.ticker.as_str();

    let published = provider.expirations(ticker).await?;
    let available = parse_expiration_dates(&published)?;
    let expiration = validate_expiration(resolve_next_friday(settings.as_of)?, &available)?;
    info!("Using expiration {} for {} (as of {})", expiration, ticker, settings.as_of);

    let chain = provider.option_chain(ticker, expiration).await?;
    let spot_price = provider.last_close(ticker).await?;
    info!("{} last close: {:.2}", ticker, spot_price);

    let puts = enrich_and_filter(&chain.puts, spot_price, settings.put_range)?;
    let calls = enrich_and_filter(&chain.calls, spot_price, settings.call_range)?;
    info!(
        "{} puts in {}, {} calls in {}",
        puts.len(),
        settings.put_range,
        calls.len(),
        settings.call_range
    );

    Ok(QuoteReport {
        symbol: chain.symbol,
        expiration,
        spot_price,
        puts,
        calls,
    })
}
