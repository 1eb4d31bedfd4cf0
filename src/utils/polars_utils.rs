use crate::cycle::QuoteReport;
use crate::error::Result;
use crate::models::EnrichedContract;
use polars::prelude::*;

/// Column order of the enriched quote table
pub const ENRICHED_COLUMNS: [&str; 7] = [
    "contract_symbol",
    "strike",
    "bid",
    "ask",
    "incremental_percentage",
    "bid_ratio",
    "ask_ratio",
];

/// Convert enriched rows to a Polars DataFrame, preserving row order
pub fn enriched_to_dataframe(rows: &[EnrichedContract]) -> Result<DataFrame> {
    // Extract data into column vectors
    let mut symbols = Vec::with_capacity(rows.len());
    let mut strikes = Vec::with_capacity(rows.len());
    let mut bids = Vec::with_capacity(rows.len());
    let mut asks = Vec::with_capacity(rows.len());
    let mut offsets = Vec::with_capacity(rows.len());
    let mut bid_ratios = Vec::with_capacity(rows.len());
    let mut ask_ratios = Vec::with_capacity(rows.len());

    for row in rows {
        symbols.push(row.contract.contract_symbol.clone());
        strikes.push(row.contract.strike);
        bids.push(row.contract.bid);
        asks.push(row.contract.ask);
        offsets.push(row.incremental_percentage);
        bid_ratios.push(row.bid_ratio);
        ask_ratios.push(row.ask_ratio);
    }

    let df = DataFrame::new(vec![
        Series::new(ENRICHED_COLUMNS[0], symbols),
        Series::new(ENRICHED_COLUMNS[1], strikes),
        Series::new(ENRICHED_COLUMNS[2], bids),
        Series::new(ENRICHED_COLUMNS[3], asks),
        Series::new(ENRICHED_COLUMNS[4], offsets),
        Series::new(ENRICHED_COLUMNS[5], bid_ratios),
        Series::new(ENRICHED_COLUMNS[6], ask_ratios),
    ])?;

    Ok(df)
}

/// One labelled table per selected side of a report, puts first
pub fn report_tables(
    report: &QuoteReport,
    plot_puts: bool,
    plot_calls: bool,
) -> Result<Vec<(&'static str, DataFrame)>> {
    let mut tables = Vec::new();
    if plot_puts {
        tables.push(("Puts", enriched_to_dataframe(&report.puts)?));
    }
    if plot_calls {
        tables.push(("Calls", enriched_to_dataframe(&report.calls)?));
    }
    Ok(tables)
}
