//! Composite generation engine.
//!
//! Enumerates every non-empty subset of a proxy table's columns (down to a
//! configurable minimum size), aggregates each subset row-wise, and names
//! the result by joining member names with `_` in enumeration order.

pub mod builder;
pub mod enumerate;

pub use builder::{CompositeBuild, build_composites, composite_name};
pub use enumerate::{combinations, subset_count, subsets};
