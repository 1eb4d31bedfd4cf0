use chrono::NaiveDate;
use thiserror::Error;

/// Error kinds surfaced by a quote cycle
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("No options data available for {date}. Try another date.")]
    UnavailableExpiration { date: NaiveDate },

    #[error("Upstream fetch error: {0}")]
    UpstreamFetch(String),

    #[error("Invalid {field}: {value} (must be a positive, finite price)")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Plot error: {0}")]
    PlotError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[cfg(feature = "dataframe")]
    #[error("DataFrame error: {0}")]
    DataFrameError(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
