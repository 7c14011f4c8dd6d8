//! CSV ingestion for subject-keyed proxy tables, plus Polars value helpers
//! used across the workspace.

pub mod csv;
pub mod polars_utils;

pub use csv::{read_csv, read_proxy_csv, write_csv};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, is_missing_value, parse_f64};
