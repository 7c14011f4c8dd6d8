//! The composite builder: one column per enumerated proxy subset.

use polars::prelude::AnyValue;
use tracing::{debug, warn};

use cogres_ingest::any_to_f64;
use cogres_ingest::any_to_string;
use cogres_model::{
    Aggregation, CogresError, CompositeColumn, CompositeFrame, CompositeOptions, NAME_SEPARATOR,
    ProxyFrame, Result, check_proxy_names,
};

use crate::enumerate::{subset_count, subsets};

/// A built composite table plus any non-fatal warnings raised before
/// enumeration (currently only the scale warning).
#[derive(Debug, Clone)]
pub struct CompositeBuild {
    pub frame: CompositeFrame,
    pub warnings: Vec<String>,
}

/// Join member proxy names into a composite name, in the order given.
pub fn composite_name(members: &[&str]) -> String {
    members.join(&NAME_SEPARATOR.to_string())
}

/// Build one composite column per non-empty subset of the frame's proxies.
///
/// Subsets are enumerated from `options.min_subset_size` up to the full
/// proxy count, in the proxy order carried by the frame. Each column holds
/// the row-wise aggregate of its members; a missing member value makes the
/// aggregate missing for that subject (no skip-missing). Deterministic:
/// identical input produces identical names and values.
pub fn build_composites(frame: &ProxyFrame, options: &CompositeOptions) -> Result<CompositeBuild> {
    if !(1..=2).contains(&options.min_subset_size) {
        return Err(CogresError::InvalidInput(format!(
            "min_subset_size must be 1 or 2, got {}",
            options.min_subset_size
        )));
    }
    check_proxy_names(frame.data(), frame.subject_col(), frame.proxies())?;

    let proxies = frame.proxies();
    let n = proxies.len();
    let mut warnings = Vec::new();
    if n > options.scale_warning_threshold {
        let message = format!(
            "{n} proxies yield {} subsets; enumeration is exact and may be slow",
            subset_count(n, options.min_subset_size)
        );
        warn!("{message}");
        warnings.push(message);
    }

    let subjects = subject_ids(frame)?;
    let member_values = proxy_values(frame)?;

    let mut columns = Vec::new();
    for subset in subsets(n, options.min_subset_size) {
        let members: Vec<&str> = subset.iter().map(|&ix| proxies[ix].as_str()).collect();
        let values = aggregate_subset(&member_values, &subset, options.aggregation, frame.record_count());
        columns.push(CompositeColumn {
            name: composite_name(&members),
            values,
        });
    }
    debug!(
        proxies = n,
        composites = columns.len(),
        "built composite table"
    );

    Ok(CompositeBuild {
        frame: CompositeFrame::new(frame.subject_col(), subjects, columns),
        warnings,
    })
}

/// Row-wise aggregate of the selected member columns with strict missing
/// propagation: any missing member makes the row's aggregate missing.
fn aggregate_subset(
    member_values: &[Vec<Option<f64>>],
    subset: &[usize],
    aggregation: Aggregation,
    rows: usize,
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut sum = Some(0.0f64);
        for &member in subset {
            sum = match (sum, member_values[member][row]) {
                (Some(acc), Some(value)) => Some(acc + value),
                _ => None,
            };
        }
        let value = match aggregation {
            Aggregation::Sum => sum,
            Aggregation::Mean => sum.map(|total| total / subset.len() as f64),
        };
        out.push(value);
    }
    out
}

fn subject_ids(frame: &ProxyFrame) -> Result<Vec<String>> {
    let series = frame.data().column(frame.subject_col())?;
    let mut out = Vec::with_capacity(frame.record_count());
    for idx in 0..frame.record_count() {
        out.push(any_to_string(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(out)
}

fn proxy_values(frame: &ProxyFrame) -> Result<Vec<Vec<Option<f64>>>> {
    let mut out = Vec::with_capacity(frame.proxies().len());
    for name in frame.proxies() {
        let series = frame.data().column(name)?;
        let mut values = Vec::with_capacity(frame.record_count());
        for idx in 0..frame.record_count() {
            values.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
        }
        out.push(values);
    }
    Ok(out)
}
