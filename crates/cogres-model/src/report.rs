use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// The three invariant checks the validator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// No two subsets produced the same composite name.
    Uniqueness,
    /// Composite column count equals the closed-form combinatorial count.
    Completeness,
    /// Sampled composites agree with re-derived aggregates.
    SpotCheck,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub check: CheckKind,
    pub severity: IssueSeverity,
    /// Offending composite column, when the finding is column-specific.
    pub column: Option<String>,
    /// Human-readable diagnostic.
    pub message: String,
    /// Occurrence count, when the finding aggregates several rows/columns.
    pub count: Option<u64>,
}

/// Diagnostic result of validating a composite table.
///
/// Never raised as an error: the caller inspects the report and decides
/// whether to trust or discard the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    /// Columns the spot check actually sampled, in sample order.
    pub spot_checked: Vec<String>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// True when the given check produced no error-severity issues.
    pub fn check_passed(&self, check: CheckKind) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| issue.check == check && issue.severity == IssueSeverity::Error)
    }
}
