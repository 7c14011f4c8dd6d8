//! IPAQ short-form scoring.
//!
//! Implements the official IPAQ scoring protocol (www.ipaq.ki.se): weekly
//! activity minutes per intensity category, an outlier flag for totals above
//! 960 minutes, and MET-minutes per week using the protocol multipliers
//! (vigorous 8.0, moderate 4.4, walking 3.3).
//!
//! Expected input layout (by position, 11 columns): subject id, then for
//! each of vigorous / moderate / walking activity a days-per-week count
//! followed by hours and minutes per session, and finally the sitting
//! question (carried through unscored). Data must be pre-cleaned; missing
//! responses are expected to be zero.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use cogres_model::{CogresError, Result};

use crate::common::{cell_or_zero, subject_ids_at};

const EXPECTED_WIDTH: usize = 11;

/// Session minutes above this are truncated when truncation is enabled,
/// per the protocol's data-processing rules.
const TRUNCATION_MINUTES: f64 = 180.0;

/// Weekly totals above this are flagged as outliers (16 hours/day rule).
const OUTLIER_MINUTES: f64 = 960.0;

const VIGOROUS_MET: f64 = 8.0;
const MODERATE_MET: f64 = 4.4;
const WALKING_MET: f64 = 3.3;

/// One intensity category's (days, hours, minutes) column positions.
const CATEGORIES: [(usize, usize, usize); 3] = [(1, 2, 3), (4, 5, 6), (7, 8, 9)];

/// Score the IPAQ short form. Returns a frame with per-category weekly
/// minutes, the outlier flag, and MET-minutes per week.
pub fn score_ipaq(df: &DataFrame, truncate: bool) -> Result<DataFrame> {
    if df.width() != EXPECTED_WIDTH {
        return Err(CogresError::InvalidInput(format!(
            "IPAQ input must have {EXPECTED_WIDTH} columns (subid + 10 responses), got {}",
            df.width()
        )));
    }
    let rows = df.height();
    let subjects = subject_ids_at(df, 0)?;

    let mut times: [Vec<f64>; 3] = [
        Vec::with_capacity(rows),
        Vec::with_capacity(rows),
        Vec::with_capacity(rows),
    ];
    let mut total_time = Vec::with_capacity(rows);
    let mut outlier = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut total = 0.0;
        for (cat, (days_col, hours_col, mins_col)) in CATEGORIES.iter().enumerate() {
            let days = cell_or_zero(df, *days_col, row);
            let mut mins = cell_or_zero(df, *hours_col, row) * 60.0 + cell_or_zero(df, *mins_col, row);
            if truncate && mins > TRUNCATION_MINUTES {
                mins = TRUNCATION_MINUTES;
            }
            let time = mins * days;
            times[cat].push(time);
            total += time;
        }
        total_time.push(total);
        outlier.push(if total > OUTLIER_MINUTES { "Yes" } else { "No" });
    }

    let met = |cat: usize, factor: f64| -> Vec<f64> {
        times[cat].iter().map(|t| t * factor).collect()
    };
    let vigorous_met = met(0, VIGOROUS_MET);
    let moderate_met = met(1, MODERATE_MET);
    let walking_met = met(2, WALKING_MET);
    let total_met: Vec<f64> = (0..rows)
        .map(|row| vigorous_met[row] + moderate_met[row] + walking_met[row])
        .collect();

    debug!(subjects = rows, truncate, "scored IPAQ short form");
    let columns: Vec<Column> = vec![
        Series::new("subid".into(), &subjects).into(),
        Series::new("vigorous_time".into(), &times[0]).into(),
        Series::new("moderate_time".into(), &times[1]).into(),
        Series::new("walking_time".into(), &times[2]).into(),
        Series::new("total_time".into(), &total_time).into(),
        Series::new("outlier".into(), &outlier).into(),
        Series::new("vigorous_met".into(), &vigorous_met).into(),
        Series::new("moderate_met".into(), &moderate_met).into(),
        Series::new("walking_met".into(), &walking_met).into(),
        Series::new("total_met".into(), &total_met).into(),
    ];
    DataFrame::new(columns).map_err(Into::into)
}
