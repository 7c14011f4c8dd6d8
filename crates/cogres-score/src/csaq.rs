//! Cognitively Stimulating Activities Questionnaire (Wilson et al. 2003)
//! frequency scoring.
//!
//! Sums frequency-of-engagement responses per retrospective timepoint
//! (ages 6, 12, 18, 40, and present) plus a grand total. Unlike the other
//! questionnaires, missing responses are NOT treated as zero here: a
//! missing item makes its timepoint sum (and the total) missing, so a
//! partially-answered questionnaire cannot masquerade as low engagement.
//! Question 16 is a duration item and is excluded from the age-40 sum.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use cogres_model::Result;

use crate::common::{named_cell, subject_ids};

const PARTS: [(&str, std::ops::RangeInclusive<u32>); 5] = [
    ("part_A_6", 1..=3),
    ("part_B_12", 4..=9),
    ("part_C_18", 10..=15),
    ("part_D_40", 17..=21),
    ("part_E_present", 22..=26),
];

/// Score the CSAQ frequency items. Returns a frame with columns `subid`,
/// the five per-timepoint sums, and `total`.
pub fn score_csaq(df: &DataFrame, subject_col: &str) -> Result<DataFrame> {
    let rows = df.height();
    let subjects = subject_ids(df, subject_col)?;

    let mut part_sums: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(rows); PARTS.len()];
    let mut totals: Vec<Option<f64>> = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut total = Some(0.0);
        for (part_ix, (_, questions)) in PARTS.iter().enumerate() {
            let mut sum = Some(0.0);
            for q in questions.clone() {
                let item = named_cell(df, &format!("BL_CSAQ_{q:03}"), row)?;
                sum = match (sum, item) {
                    (Some(acc), Some(v)) => Some(acc + v),
                    _ => None,
                };
            }
            total = match (total, sum) {
                (Some(acc), Some(v)) => Some(acc + v),
                _ => None,
            };
            part_sums[part_ix].push(sum);
        }
        totals.push(total);
    }

    debug!(subjects = rows, "scored CSAQ frequency");
    let mut columns: Vec<Column> = vec![Series::new("subid".into(), &subjects).into()];
    for (part_ix, (name, _)) in PARTS.iter().enumerate() {
        columns.push(Series::new((*name).into(), &part_sums[part_ix]).into());
    }
    columns.push(Series::new("total".into(), &totals).into());
    DataFrame::new(columns).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(values: &[(u32, Option<f64>)]) -> DataFrame {
        let mut columns: Vec<Column> = vec![Series::new("subid".into(), &["s1"]).into()];
        for q in 1..=26u32 {
            let value = values
                .iter()
                .find(|(question, _)| *question == q)
                .map_or(Some(0.0), |(_, v)| *v);
            columns.push(Series::new(format!("BL_CSAQ_{q:03}").as_str().into(), &[value]).into());
        }
        DataFrame::new(columns).unwrap()
    }

    fn part(df: &DataFrame, name: &str) -> Option<f64> {
        score_csaq(df, "subid")
            .unwrap()
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
    }

    #[test]
    fn sums_each_timepoint() {
        let df = input(&[(1, Some(2.0)), (2, Some(3.0)), (3, Some(1.0)), (10, Some(4.0))]);
        assert_eq!(part(&df, "part_A_6"), Some(6.0));
        assert_eq!(part(&df, "part_C_18"), Some(4.0));
        assert_eq!(part(&df, "total"), Some(10.0));
    }

    #[test]
    fn missing_item_propagates_to_part_and_total() {
        let df = input(&[(4, None), (1, Some(5.0))]);
        assert_eq!(part(&df, "part_B_12"), None);
        assert_eq!(part(&df, "part_A_6"), Some(5.0));
        assert_eq!(part(&df, "total"), None);
    }

    #[test]
    fn question_sixteen_is_excluded() {
        let df = input(&[(16, None), (17, Some(2.0))]);
        assert_eq!(part(&df, "part_D_40"), Some(2.0));
        assert_eq!(part(&df, "total"), Some(2.0));
    }

    #[test]
    fn missing_question_column_is_an_error() {
        let columns: Vec<Column> = vec![Series::new("subid".into(), &["s1"]).into()];
        let df = DataFrame::new(columns).unwrap();
        assert!(score_csaq(&df, "subid").is_err());
    }
}
