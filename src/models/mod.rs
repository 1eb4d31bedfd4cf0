//! Data models for option chains and their derived metrics
//!
//! This module contains the contract and chain records delivered by the
//! market-data provider, the filter interval, and the enriched rows produced
//! by the metrics transform.

mod option;

pub use option::*;
