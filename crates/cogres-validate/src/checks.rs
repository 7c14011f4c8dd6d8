//! The three invariant checks.
//!
//! Each check runs to completion regardless of earlier failures and
//! contributes issues to the shared report; none of them aborts.

use std::collections::BTreeMap;

use polars::prelude::AnyValue;
use rand::Rng;

use cogres_ingest::any_to_f64;
use cogres_model::{
    Aggregation, CheckKind, CompositeFrame, IssueSeverity, NAME_SEPARATOR, ProxyFrame,
    ValidationIssue,
};

use crate::combinatorics::expected_subset_count;

/// Check 1: no two subsets produced the same composite name.
pub fn check_uniqueness(composites: &CompositeFrame) -> Vec<ValidationIssue> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for name in composites.composite_names() {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| ValidationIssue {
            check: CheckKind::Uniqueness,
            severity: IssueSeverity::Error,
            column: Some(name.to_string()),
            message: format!("composite name '{name}' produced by {count} distinct subsets"),
            count: Some(count),
        })
        .collect()
}

/// Check 2: the number of unique composite names equals the closed-form
/// combinatorial count for the proxy set.
pub fn check_completeness(
    proxy_count: usize,
    min_subset_size: usize,
    composites: &CompositeFrame,
) -> Vec<ValidationIssue> {
    let names = composites.composite_names();
    let unique: std::collections::BTreeSet<&str> = names.iter().copied().collect();
    let expected = expected_subset_count(proxy_count, min_subset_size);
    if unique.len() as u128 == expected {
        return Vec::new();
    }
    vec![ValidationIssue {
        check: CheckKind::Completeness,
        severity: IssueSeverity::Error,
        column: None,
        message: format!(
            "expected {expected} unique composite columns for {proxy_count} proxies \
             (min subset size {min_subset_size}), found {}",
            unique.len()
        ),
        count: Some(unique.len() as u64),
    }]
}

/// Check 3: a random sample of composite columns agrees exactly with the
/// aggregate re-derived from the original proxy columns, missing values
/// included.
///
/// Returns the issues plus the names actually sampled, in sample order.
pub fn check_spot(
    original: &ProxyFrame,
    composites: &CompositeFrame,
    aggregation: Aggregation,
    sample_size: usize,
    rng: &mut impl Rng,
) -> (Vec<ValidationIssue>, Vec<String>) {
    let mut issues = Vec::new();
    let column_count = composites.composite_count();
    let take = sample_size.min(column_count);
    let sampled = rand::seq::index::sample(rng, column_count, take);

    let mut checked = Vec::with_capacity(take);
    for ix in sampled.iter() {
        let column = &composites.columns()[ix];
        checked.push(column.name.clone());

        let members: Vec<&str> = column.name.split(NAME_SEPARATOR).collect();
        let mut member_values = Vec::with_capacity(members.len());
        let mut resolvable = true;
        for member in &members {
            if !original.proxies().iter().any(|p| p == member) {
                issues.push(ValidationIssue {
                    check: CheckKind::SpotCheck,
                    severity: IssueSeverity::Error,
                    column: Some(column.name.clone()),
                    message: format!(
                        "cannot re-derive '{}': name fragment '{member}' is not a known proxy",
                        column.name
                    ),
                    count: None,
                });
                resolvable = false;
                break;
            }
            member_values.push(column_values(original, member));
        }
        if !resolvable {
            continue;
        }

        let rederived = rederive(&member_values, aggregation, original.record_count());
        let mismatches = count_mismatches(&column.values, &rederived);
        if mismatches > 0 {
            issues.push(ValidationIssue {
                check: CheckKind::SpotCheck,
                severity: IssueSeverity::Error,
                column: Some(column.name.clone()),
                message: format!(
                    "'{}' disagrees with the {} of {} in {mismatches} row(s)",
                    column.name,
                    match aggregation {
                        Aggregation::Mean => "mean",
                        Aggregation::Sum => "sum",
                    },
                    members.join(" + "),
                ),
                count: Some(mismatches),
            });
        }
    }
    (issues, checked)
}

fn column_values(frame: &ProxyFrame, name: &str) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(frame.record_count());
    match frame.data().column(name) {
        Ok(series) => {
            for idx in 0..frame.record_count() {
                out.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
            }
        }
        Err(_) => out.resize(frame.record_count(), None),
    }
    out
}

fn rederive(
    member_values: &[Vec<Option<f64>>],
    aggregation: Aggregation,
    rows: usize,
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut sum = Some(0.0f64);
        for values in member_values {
            sum = match (sum, values[row]) {
                (Some(acc), Some(value)) => Some(acc + value),
                _ => None,
            };
        }
        out.push(match aggregation {
            Aggregation::Sum => sum,
            Aggregation::Mean => sum.map(|total| total / member_values.len() as f64),
        });
    }
    out
}

fn count_mismatches(stored: &[Option<f64>], rederived: &[Option<f64>]) -> u64 {
    if stored.len() != rederived.len() {
        return stored.len().max(rederived.len()) as u64;
    }
    stored
        .iter()
        .zip(rederived)
        .filter(|(a, b)| match (a, b) {
            (None, None) => false,
            (Some(x), Some(y)) => x != y,
            _ => true,
        })
        .count() as u64
}
