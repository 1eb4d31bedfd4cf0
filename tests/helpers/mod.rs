// Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use options_quote::models::{OptionChain, OptionContract, OptionType};
use options_quote::settings::Settings;
use options_quote::StaticProvider;

pub const AAPL: &str = "AAPL";

/// Construct a `NaiveDate` from components for readability in tests.
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn contract(option_type: OptionType, expiration: NaiveDate, strike: f64, bid: f64, ask: f64) -> OptionContract {
    let tag = match option_type {
        OptionType::Call => 'C',
        OptionType::Put => 'P',
    };
    let symbol = format!(
        "{}{}{}{:08}",
        AAPL,
        expiration.format("%y%m%d"),
        tag,
        (strike * 1000.0).round() as u64
    );
    OptionContract::new(symbol, option_type, strike, bid, ask)
}

/// AAPL chain for 2025-01-10 around a spot of 100.
pub fn aapl_chain() -> OptionChain {
    let exp = ymd(2025, 1, 10);
    let mut chain = OptionChain::new(AAPL.to_string(), exp);
    for (strike, bid, ask) in [
        (70.0, 0.05, 0.10),
        (85.0, 0.40, 0.50),
        (95.0, 1.20, 1.35),
        (100.0, 2.50, 2.70),
        (104.0, 4.80, 5.10),
        (110.0, 10.10, 10.40),
    ] {
        chain.push(contract(OptionType::Put, exp, strike, bid, ask));
    }
    for (strike, bid, ask) in [
        (90.0, 10.20, 10.50),
        (96.0, 4.90, 5.20),
        (100.0, 2.40, 2.60),
        (110.0, 0.50, 0.60),
        (125.0, 0.02, 0.05),
    ] {
        chain.push(contract(OptionType::Call, exp, strike, bid, ask));
    }
    chain
}

pub fn aapl_provider() -> StaticProvider {
    StaticProvider::new()
        .with_expiration(AAPL, "2025-01-03")
        .with_chain(aapl_chain())
        .with_expiration(AAPL, "2025-01-17")
        .with_close(AAPL, 100.0)
}

pub fn settings_as_of(as_of: NaiveDate) -> Settings {
    Settings {
        ticker: AAPL.to_string(),
        as_of,
        ..Settings::default()
    }
}
