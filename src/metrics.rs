//! Strike offset and premium/strike ratios for an option chain side

use crate::error::{QuoteError, Result};
use crate::models::{EnrichedContract, FilterRange, OptionContract};
use tracing::trace;

fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(QuoteError::InvalidPrice { field, value })
    }
}

/// Attach the derived metrics to a single contract.
pub fn enrich(contract: &OptionContract, spot_price: f64) -> Result<EnrichedContract> {
    let spot = ensure_positive("spot price", spot_price)?;
    let strike = ensure_positive("strike", contract.strike)?;

    Ok(EnrichedContract {
        contract: contract.clone(),
        incremental_percentage: (strike - spot) / spot * 100.0,
        bid_ratio: contract.bid / strike * 100.0,
        ask_ratio: contract.ask / strike * 100.0,
    })
}

/// Enrich every contract, then keep the rows whose strike offset lies in
/// `range` (inclusive). Input order is preserved.
///
/// Any non-positive spot or strike fails the whole call, even when the
/// offending row would have been filtered out.
pub fn enrich_and_filter(
    contracts: &[OptionContract],
    spot_price: f64,
    range: FilterRange,
) -> Result<Vec<EnrichedContract>> {
    ensure_positive("spot price", spot_price)?;

    let enriched = contracts
        .iter()
        .map(|c| enrich(c, spot_price))
        .collect::<Result<Vec<_>>>()?;

    let filtered: Vec<EnrichedContract> = enriched
        .into_iter()
        .filter(|e| range.contains(e.incremental_percentage))
        .collect();

    trace!(
        "Kept {} of {} contracts in range {}",
        filtered.len(),
        contracts.len(),
        range
    );

    Ok(filtered)
}
