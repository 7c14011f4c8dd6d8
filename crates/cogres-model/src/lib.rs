//! Shared data model for the cognitive reserve toolkit: proxy frames,
//! composite options, errors, and validation reports.

pub mod error;
pub mod frame;
pub mod options;
pub mod report;

pub use error::{CogresError, Result};
pub use frame::{CompositeColumn, CompositeFrame, ProxyFrame, check_proxy_names};
pub use options::{
    Aggregation, CompositeOptions, DEFAULT_SCALE_WARNING_THRESHOLD, NAME_SEPARATOR,
};
pub use report::{CheckKind, IssueSeverity, ValidationIssue, ValidationReport};
