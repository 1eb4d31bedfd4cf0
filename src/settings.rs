//! Form settings for one quote cycle
//!
//! `Settings` replaces the session-scoped form state of an interactive front
//! end: the presentation layer builds or loads one, hands it to
//! [`run_cycle`](crate::cycle::run_cycle), and persists it again if it wants
//! the values back next time.

use crate::error::{QuoteError, Result};
use crate::models::FilterRange;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_PUT_RANGE: FilterRange = FilterRange::new(-20.0, 5.0);
pub const DEFAULT_CALL_RANGE: FilterRange = FilterRange::new(-5.0, 20.0);
/// Outer limits the put range may be set to
pub const PUT_RANGE_BOUNDS: FilterRange = FilterRange::new(-50.0, 10.0);
/// Outer limits the call range may be set to
pub const CALL_RANGE_BOUNDS: FilterRange = FilterRange::new(-10.0, 50.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub ticker: String,
    /// Per session: never written to the settings file, always today on load.
    #[serde(skip, default = "today")]
    pub as_of: NaiveDate,
    pub put_range: FilterRange,
    pub call_range: FilterRange,
    pub plot_puts: bool,
    pub plot_calls: bool,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            as_of: today(),
            put_range: DEFAULT_PUT_RANGE,
            call_range: DEFAULT_CALL_RANGE,
            plot_puts: true,
            plot_calls: false,
        }
    }
}

impl Settings {
    /// Restore every field to its default ("Load Defaults").
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalise the ticker and clamp both ranges into their slider bounds.
    ///
    /// An inverted range is kept as is; it simply selects nothing.
    pub fn clamped(mut self) -> Result<Self> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(QuoteError::ConfigError("Stock ticker must not be empty".to_string()));
        }
        self.ticker = ticker;
        self.put_range = self.put_range.clamp_to(PUT_RANGE_BOUNDS);
        self.call_range = self.call_range.clamp_to(CALL_RANGE_BOUNDS);
        Ok(self)
    }

    /// Load settings from a JSON file; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Settings saved to {:?}", path);
        Ok(())
    }
}
