//! The composites pipeline: ingest, transform, build, validate, persist.
//!
//! Kept in the library so integration tests can drive the same code path
//! as the `composites` subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cogres_composite::build_composites;
use cogres_ingest::{read_proxy_csv, write_csv};
use cogres_model::{CompositeOptions, ValidationReport};
use cogres_transform::{flip_columns, zscore_columns};
use cogres_validate::{validate_composites, write_validation_report_json};

/// Inputs for one composites run, resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct CompositesConfig {
    pub input: PathBuf,
    pub subject_col: String,
    /// Explicit proxy selection; `None` means every non-subject column.
    pub proxies: Option<Vec<String>>,
    pub options: CompositeOptions,
    pub standardize: bool,
    pub flip: Vec<String>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub keep_on_errors: bool,
}

/// Outcome of one composites run, consumed by the summary printer.
#[derive(Debug)]
pub struct CompositesResult {
    pub output_dir: PathBuf,
    pub subjects: usize,
    pub proxies: Vec<String>,
    pub composite_count: usize,
    pub warnings: Vec<String>,
    pub report: ValidationReport,
    pub composites_csv: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

impl CompositesResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}

/// Run the full pipeline: read the proxy CSV, apply the optional flip and
/// z-score transforms, build every composite, validate the result, and
/// persist the outputs.
///
/// The JSON validation report is always written (unless dry-run). The
/// composites CSV is withheld when validation reports errors, unless
/// `keep_on_errors` is set.
pub fn run_composites_pipeline(config: &CompositesConfig) -> Result<CompositesResult> {
    let span = info_span!("composites", input = %config.input.display());
    let _guard = span.enter();

    let mut frame = read_proxy_csv(
        &config.input,
        &config.subject_col,
        config.proxies.as_deref(),
    )?;
    info!(
        subjects = frame.record_count(),
        proxies = frame.proxies().len(),
        "loaded proxy table"
    );

    if !config.flip.is_empty() {
        flip_columns(&mut frame, &config.flip).context("flip columns")?;
    }
    if config.standardize {
        let proxies = frame.proxies().to_vec();
        zscore_columns(&mut frame, &proxies).context("standardize columns")?;
    }

    let build = build_composites(&frame, &config.options)?;
    let report = validate_composites(&frame, &build.frame, &config.options);

    let mut composites_csv = None;
    let mut report_json = None;
    if config.dry_run {
        info!("dry run; skipping output files");
    } else {
        report_json = Some(write_validation_report_json(&config.output_dir, &report)?);
        if report.has_errors() && !config.keep_on_errors {
            warn!(
                errors = report.error_count(),
                "validation errors; composites CSV not written (--keep-on-errors to override)"
            );
        } else {
            let path = config.output_dir.join(composites_file_name(&config.input));
            let mut df = build
                .frame
                .to_data_frame()
                .context("materialize composite table")?;
            write_csv(&mut df, &path)?;
            composites_csv = Some(path);
        }
    }

    Ok(CompositesResult {
        output_dir: config.output_dir.clone(),
        subjects: frame.record_count(),
        proxies: frame.proxies().to_vec(),
        composite_count: build.frame.composite_count(),
        warnings: build.warnings,
        report,
        composites_csv,
        report_json,
    })
}

/// `<input stem>_composites.csv`.
fn composites_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| "proxies".to_string(), |s| s.to_string_lossy().to_string());
    format!("{stem}_composites.csv")
}
