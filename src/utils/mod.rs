mod plotting;
#[cfg(feature = "dataframe")]
pub mod polars_utils;

pub use plotting::*;
