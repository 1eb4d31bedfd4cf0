use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// One listed contract as delivered by the market-data provider.
///
/// Only `strike`, `bid` and `ask` take part in the metric computation; the
/// remaining fields are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub contract_symbol: String, // OCC format
    pub option_type: OptionType,
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
    pub last: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
}

impl OptionContract {
    pub fn new(contract_symbol: String, option_type: OptionType, strike: f64, bid: f64, ask: f64) -> Self {
        Self {
            contract_symbol,
            option_type,
            strike,
            bid,
            ask,
            last: None,
            volume: None,
            open_interest: None,
        }
    }

    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    pub fn is_put(&self) -> bool {
        self.option_type == OptionType::Put
    }
}

/// Option chain for one underlying and one expiration date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub symbol: String,
    pub expiration: NaiveDate,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn new(symbol: String, expiration: NaiveDate) -> Self {
        Self {
            symbol,
            expiration,
            calls: Vec::new(),
            puts: Vec::new(),
        }
    }

    /// Route a contract to its side of the chain.
    pub fn push(&mut self, contract: OptionContract) {
        match contract.option_type {
            OptionType::Call => self.calls.push(contract),
            OptionType::Put => self.puts.push(contract),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }
}

/// Closed percentage interval `[min, max]` applied to the strike offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    pub min: f64,
    pub max: f64,
}

impl FilterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamp both endpoints into `bounds` without reordering them.
    pub fn clamp_to(&self, bounds: FilterRange) -> Self {
        Self {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        }
    }
}

impl std::fmt::Display for FilterRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl std::str::FromStr for FilterRange {
    type Err = String;

    /// Parses `MIN:MAX`, e.g. `-20:5`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (min, max) = s
            .split_once(':')
            .ok_or_else(|| format!("expected MIN:MAX, got '{}'", s))?;
        let min = min
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid range minimum '{}': {}", min, e))?;
        let max = max
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid range maximum '{}': {}", max, e))?;
        Ok(Self { min, max })
    }
}

/// A contract with its derived metrics attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContract {
    pub contract: OptionContract,
    /// (strike - spot) / spot * 100
    pub incremental_percentage: f64,
    /// bid / strike * 100
    pub bid_ratio: f64,
    /// ask / strike * 100
    pub ask_ratio: f64,
}

impl EnrichedContract {
    pub fn strike(&self) -> f64 {
        self.contract.strike
    }
}

/// Fields decoded from an OCC option symbol
#[derive(Debug, Clone, PartialEq)]
pub struct OccSymbol {
    pub root: String,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub strike: f64,
}

/// Parse an OCC option symbol.
///
/// format: Root + YY + MM + DD + C/P + Strike*1000 (8 digits)
/// e.g. AAPL250110C00145000
pub fn parse_occ_symbol(occ_symbol: &str) -> Option<OccSymbol> {
    trace!("Parsing OCC symbol: {}", occ_symbol);

    // The strike block is fixed width, so the type character sits 9 from the end
    if occ_symbol.len() < 16 || !occ_symbol.is_ascii() {
        warn!("OCC symbol too short: {}", occ_symbol);
        return None;
    }
    let type_pos = occ_symbol.len() - 9;

    let option_type = match &occ_symbol[type_pos..type_pos + 1] {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        other => {
            warn!("Invalid option type character '{}' in OCC symbol: {}", other, occ_symbol);
            return None;
        }
    };

    let root = occ_symbol[..type_pos - 6].trim().to_string();
    let date_str = &occ_symbol[type_pos - 6..type_pos];
    let strike_str = &occ_symbol[type_pos + 1..];

    let expiration = match NaiveDate::parse_from_str(&format!("20{}", date_str), "%Y%m%d") {
        Ok(d) => d,
        Err(e) => {
            warn!("Invalid date '{}' in OCC symbol {}: {}", date_str, occ_symbol, e);
            return None;
        }
    };

    let strike = match strike_str.parse::<u64>() {
        Ok(s) => s as f64 / 1000.0,
        Err(e) => {
            warn!("Failed to parse strike price '{}' in OCC symbol {}: {}", strike_str, occ_symbol, e);
            return None;
        }
    };

    Some(OccSymbol {
        root,
        expiration,
        option_type,
        strike,
    })
}
