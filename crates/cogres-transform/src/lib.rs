//! Pre-composite transforms over proxy frames.

pub mod standardize;

pub use standardize::{flip_columns, zscore_columns};
