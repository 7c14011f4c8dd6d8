//! Configuration options for composite generation and validation.

use serde::{Deserialize, Serialize};

/// Separator used to join member proxy names into a composite name.
pub const NAME_SEPARATOR: char = '_';

/// Proxy counts above this yield over a million subsets; enumeration is
/// still exact but should be flagged before it starts.
pub const DEFAULT_SCALE_WARNING_THRESHOLD: usize = 20;

/// Row-wise aggregate applied to each subset's member columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Arithmetic mean across members.
    #[default]
    Mean,
    /// Raw sum across members.
    Sum,
}

/// Options controlling composite building and validation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeOptions {
    /// Aggregation mode for each subset.
    pub aggregation: Aggregation,

    /// Smallest subset size to enumerate. 1 keeps the original proxies as
    /// degenerate composites; 2 starts at pairs. No other values are valid.
    pub min_subset_size: usize,

    /// Emit a scale warning before enumerating when the proxy count
    /// exceeds this threshold.
    pub scale_warning_threshold: usize,

    /// Number of composite columns the validator re-derives at random.
    pub spot_check_sample: usize,

    /// Seed for the spot-check sampler. None draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            aggregation: Aggregation::Mean,
            min_subset_size: 1,
            scale_warning_threshold: DEFAULT_SCALE_WARNING_THRESHOLD,
            spot_check_sample: 5,
            seed: None,
        }
    }
}

impl CompositeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn with_min_subset_size(mut self, size: usize) -> Self {
        self.min_subset_size = size;
        self
    }

    #[must_use]
    pub fn with_spot_check_sample(mut self, sample: usize) -> Self {
        self.spot_check_sample = sample;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
