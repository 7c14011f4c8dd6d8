//! Cognitive Reserve Index questionnaire (CRIq) scoring.
//!
//! Follows the published scoring procedure (Nucci et al. 2012) and the
//! accompanying scoring spreadsheet: age-regressed residuals for the
//! education, working-activity, and leisure sections, each scaled to a
//! mean-100/SD-15 metric, plus a rescaled total.
//!
//! Expected input layout (by position, 43 columns): subject id, age, two
//! education responses, five working-activity year counts (job levels 1-5),
//! then the leisure block: weekly (5 questions), monthly (6), annual (3),
//! and fixed-frequency (3) activities, each as a frequency/years response
//! pair, with the children question pair between them at positions 37-38.
//! Data must be pre-cleaned; missing responses are expected to be zero.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use cogres_model::{CogresError, Result};

use crate::common::{cell_or_zero, roundup5, subject_ids_at};

const EXPECTED_WIDTH: usize = 43;
const AGE_COL: usize = 1;
const EDU_COLS: std::ops::Range<usize> = 2..4;
const WORK_COLS: std::ops::Range<usize> = 4..9;
const CHILDREN_COUNT_COL: usize = 38;

// Regression coefficients from the CRIq scoring spreadsheet.
const EDU_INTERCEPT: f64 = 21.169_129_3;
const EDU_SLOPE: f64 = -0.164_209_2;
const EDU_STD: f64 = 4.749_805;
const WORK_INTERCEPT: f64 = -2.082;
const WORK_SLOPE: f64 = 1.124;
const WORK_STD: f64 = 40.219_79;
const LEISURE_INTERCEPT: f64 = 2.68;
const LEISURE_SLOPE: f64 = 3.754;
const LEISURE_STD: f64 = 80.241_01;
const TOTAL_STD: f64 = 11.322_77;

/// Score the CRIq. Returns a frame with columns `subid`, `edu`, `working`,
/// `leisure`, and `total`, all standardized. Subjects whose responses are
/// all zero (questionnaire not answered) get missing scores throughout.
pub fn score_criq(df: &DataFrame) -> Result<DataFrame> {
    if df.width() != EXPECTED_WIDTH {
        return Err(CogresError::InvalidInput(format!(
            "CRIq input must have {EXPECTED_WIDTH} columns (subid, age, 41 responses), got {}",
            df.width()
        )));
    }
    let rows = df.height();
    let subjects = subject_ids_at(df, 0)?;

    let mut edu_scores = Vec::with_capacity(rows);
    let mut working_scores = Vec::with_capacity(rows);
    let mut leisure_scores = Vec::with_capacity(rows);
    let mut total_scores = Vec::with_capacity(rows);

    for row in 0..rows {
        // Subjects with all-zero answers (age included) never answered;
        // scoring them would fabricate a reserve estimate.
        let answered = (AGE_COL..EXPECTED_WIDTH).any(|col| cell_or_zero(df, col, row) != 0.0);
        if !answered {
            edu_scores.push(None);
            working_scores.push(None);
            leisure_scores.push(None);
            total_scores.push(None);
            continue;
        }

        let age = cell_or_zero(df, AGE_COL, row);

        let edu_raw: f64 = EDU_COLS.map(|col| cell_or_zero(df, col, row)).sum();
        let edu = standardize(edu_raw, age, EDU_SLOPE, EDU_INTERCEPT, EDU_STD);

        // An unanswered working section scores zero, not missing, per the
        // scoring sheet's missing-as-zero convention.
        let working = working_raw(df, row)
            .map_or(0.0, |raw| standardize(raw, age, WORK_SLOPE, WORK_INTERCEPT, WORK_STD));

        let leisure = standardize(
            leisure_raw(df, row),
            age,
            LEISURE_SLOPE,
            LEISURE_INTERCEPT,
            LEISURE_STD,
        );

        let mean = (edu + working + leisure) / 3.0;
        let total = ((mean - 100.0) / TOTAL_STD) * 15.0 + 100.0;

        edu_scores.push(Some(edu));
        working_scores.push(Some(working));
        leisure_scores.push(Some(leisure));
        total_scores.push(Some(total));
    }

    debug!(subjects = rows, "scored CRIq");
    let columns: Vec<Column> = vec![
        Series::new("subid".into(), &subjects).into(),
        Series::new("edu".into(), &edu_scores).into(),
        Series::new("working".into(), &working_scores).into(),
        Series::new("leisure".into(), &leisure_scores).into(),
        Series::new("total".into(), &total_scores).into(),
    ];
    DataFrame::new(columns).map_err(Into::into)
}

fn standardize(raw: f64, age: f64, slope: f64, intercept: f64, std: f64) -> f64 {
    let expected = age * slope + intercept;
    ((raw - expected) / std) * 15.0 + 100.0
}

/// Working-activity raw score: years per job level are rounded up to the
/// nearest 5 and weighted by level; the score is the highest weighted entry
/// plus the mean of the remaining entries (dropping the lowest when more
/// than three entries are present, as the scoring sheet allows only three).
/// Returns None when no working years were reported at all.
fn working_raw(df: &DataFrame, row: usize) -> Option<f64> {
    let mut weighted: Vec<Option<f64>> = WORK_COLS
        .enumerate()
        .map(|(level_ix, col)| {
            let years = cell_or_zero(df, col, row);
            let value = roundup5(years) * (level_ix + 1) as f64;
            if value == 0.0 { None } else { Some(value) }
        })
        .collect();

    let max_ix = index_of_max(&weighted)?;
    let max_value = weighted[max_ix].take()?;

    let mut rest: Vec<f64> = weighted.iter().copied().flatten().collect();
    if rest.len() >= 3 {
        let min_ix = rest
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(ix, _)| ix)?;
        rest.remove(min_ix);
    }
    let rest_mean = if rest.is_empty() {
        0.0
    } else {
        rest.iter().sum::<f64>() / rest.len() as f64
    };
    Some(max_value + rest_mean)
}

fn index_of_max(values: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (ix, value) in values.iter().enumerate() {
        if let Some(v) = value
            && best.is_none_or(|(_, current)| *v > current)
        {
            best = Some((ix, *v));
        }
    }
    best.map(|(ix, _)| ix)
}

/// Leisure raw score: sum over each activity of weekly/monthly/annual/fixed
/// frequency times years (years rounded up to 5), plus the children score
/// (5 per child plus 10, or 0 with no children).
fn leisure_raw(df: &DataFrame, row: usize) -> f64 {
    let activity_cols: Vec<usize> = (9..37).chain(39..43).collect();
    let mut activity = 0.0;
    for pair in activity_cols.chunks(2) {
        let freq = cell_or_zero(df, pair[0], row);
        let years = roundup5(cell_or_zero(df, pair[1], row));
        activity += freq * years;
    }

    let children = cell_or_zero(df, CHILDREN_COUNT_COL, row);
    let children_score = if children == 0.0 {
        0.0
    } else {
        children * 5.0 + 10.0
    };
    activity + children_score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(cells: Vec<Vec<f64>>) -> DataFrame {
        let rows = cells.len();
        let subjects: Vec<String> = (1..=rows).map(|i| format!("s{i}")).collect();
        let mut columns: Vec<Column> = vec![Series::new("subid".into(), &subjects).into()];
        for col in 0..EXPECTED_WIDTH - 1 {
            let values: Vec<f64> = (0..rows).map(|row| cells[row][col]).collect();
            columns.push(Series::new(format!("q{col}").as_str().into(), &values).into());
        }
        DataFrame::new(columns).unwrap()
    }

    fn blank_row() -> Vec<f64> {
        vec![0.0; EXPECTED_WIDTH - 1]
    }

    #[test]
    fn rejects_wrong_width() {
        let columns: Vec<Column> = vec![Series::new("subid".into(), &["s1"]).into()];
        let df = DataFrame::new(columns).unwrap();
        assert!(score_criq(&df).is_err());
    }

    #[test]
    fn education_subscore_matches_formula() {
        let mut row = blank_row();
        row[0] = 60.0; // age
        row[1] = 13.0; // education years
        row[2] = 5.0; // extra training
        let scored = score_criq(&input(vec![row])).unwrap();

        let expected_edu = 60.0 * EDU_SLOPE + EDU_INTERCEPT;
        let want = ((18.0 - expected_edu) / EDU_STD) * 15.0 + 100.0;
        let got = scored.column("edu").unwrap().f64().unwrap().get(0).unwrap();
        assert!((got - want).abs() < 1e-9);
    }

    #[test]
    fn working_raw_adds_max_and_mean_of_rest() {
        let mut row = blank_row();
        row[0] = 50.0;
        row[3] = 10.0; // level 1: roundup 10 * 1 = 10
        row[4] = 3.0; // level 2: roundup 5 * 2 = 10
        let df = input(vec![row]);
        assert_eq!(working_raw(&df, 0), Some(20.0));
    }

    #[test]
    fn working_raw_drops_lowest_beyond_three_entries() {
        let mut row = blank_row();
        row[0] = 50.0;
        // levels 1..5 with years 5,10,15,20,25 -> weighted 5,20,45,80,125
        for (ix, years) in [5.0, 10.0, 15.0, 20.0, 25.0].iter().enumerate() {
            row[3 + ix] = *years;
        }
        let df = input(vec![row]);
        // max 125; rest [5,20,45,80] drops 5 -> mean 48.333...
        let raw = working_raw(&df, 0).unwrap();
        assert!((raw - (125.0 + 145.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn working_raw_is_none_without_any_years() {
        let mut row = blank_row();
        row[0] = 50.0;
        row[1] = 10.0; // education only
        let df = input(vec![row]);
        assert_eq!(working_raw(&df, 0), None);
    }

    #[test]
    fn leisure_children_score_zero_for_no_children() {
        let mut row = blank_row();
        row[0] = 40.0;
        let df = input(vec![row.clone()]);
        assert_eq!(leisure_raw(&df, 0), 0.0);

        row[37] = 2.0; // two children at position 38 (col 37 after subid)
        let df = input(vec![row]);
        assert_eq!(leisure_raw(&df, 0), 20.0);
    }

    #[test]
    fn leisure_multiplies_frequency_by_rounded_years() {
        let mut row = blank_row();
        row[0] = 40.0;
        row[8] = 1.0; // first weekly activity: frequency (col 9)
        row[9] = 12.0; // its years -> rounds to 15 (col 10)
        let df = input(vec![row]);
        assert_eq!(leisure_raw(&df, 0), 15.0);
    }

    #[test]
    fn all_zero_subject_scores_missing() {
        let scored = score_criq(&input(vec![blank_row()])).unwrap();
        for name in ["edu", "working", "leisure", "total"] {
            assert!(scored.column(name).unwrap().get(0).unwrap().is_null());
        }
    }
}
