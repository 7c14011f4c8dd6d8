//! Post-hoc validation of generated composite tables.
//!
//! Three independent checks (naming uniqueness, combinatorial completeness,
//! spot-checked arithmetic) run unconditionally and accumulate into a
//! [`ValidationReport`]. Validation is diagnostic, never a gate: it reports
//! errors and leaves the persistence decision to the caller.

pub mod checks;
pub mod combinatorics;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use cogres_model::{CompositeFrame, CompositeOptions, ProxyFrame, ValidationReport};

pub use checks::{check_completeness, check_spot, check_uniqueness};
pub use combinatorics::{binomial, expected_subset_count};

/// Run all three checks against a built composite table.
///
/// `original` must be the same frame (and proxy ordering) the builder
/// consumed. The spot-check sample is drawn with `options.seed` when given,
/// making the whole report reproducible.
pub fn validate_composites(
    original: &ProxyFrame,
    composites: &CompositeFrame,
    options: &CompositeOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.issues.extend(check_uniqueness(composites));
    report.issues.extend(check_completeness(
        original.proxies().len(),
        options.min_subset_size,
        composites,
    ));

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (spot_issues, spot_checked) = check_spot(
        original,
        composites,
        options.aggregation,
        options.spot_check_sample,
        &mut rng,
    );
    report.issues.extend(spot_issues);
    report.spot_checked = spot_checked;

    if report.has_errors() {
        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "composite validation found problems"
        );
    } else {
        debug!(
            spot_checked = report.spot_checked.len(),
            "composite validation passed"
        );
    }
    report
}

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    error_count: usize,
    warning_count: usize,
    report: &'a ValidationReport,
}

const REPORT_SCHEMA: &str = "cogres.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Write the report as a schema-tagged JSON file next to the outputs.
pub fn write_validation_report_json(
    output_dir: &Path,
    report: &ValidationReport,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join("validation_report.json");
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        report,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
