//! Column-wise standardization of proxy variables.
//!
//! Raw proxies arrive on incommensurate scales (years of education, job
//! complexity codes, MET minutes); composites only make sense over
//! z-scored columns. The z-score uses the population standard deviation
//! (ddof = 0). Missing values are left missing and excluded from the
//! mean/std estimates.

use polars::prelude::{AnyValue, NamedFrom, Series};
use tracing::debug;

use cogres_ingest::any_to_f64;
use cogres_model::{CogresError, ProxyFrame, Result};

/// Replace each listed column with its z-scored version.
///
/// Fails on a constant column (zero standard deviation), which cannot be
/// standardized.
pub fn zscore_columns(frame: &mut ProxyFrame, columns: &[String]) -> Result<()> {
    for name in columns {
        let values = extract(frame, name)?;
        let present: Vec<f64> = values.iter().copied().flatten().collect();
        if present.is_empty() {
            return Err(CogresError::InvalidInput(format!(
                "column '{name}' has no observed values to standardize"
            )));
        }
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        let variance =
            present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / present.len() as f64;
        let std = variance.sqrt();
        if std == 0.0 {
            return Err(CogresError::InvalidInput(format!(
                "column '{name}' is constant and cannot be z-scored"
            )));
        }

        let scored: Vec<Option<f64>> = values
            .iter()
            .map(|value| value.map(|v| (v - mean) / std))
            .collect();
        frame
            .data_mut()
            .with_column(Series::new(name.as_str().into(), scored))?;
        debug!(column = %name, mean, std, "z-scored column");
    }
    Ok(())
}

/// Multiply each listed column by -1 so that higher values consistently
/// indicate higher cognitive reserve.
pub fn flip_columns(frame: &mut ProxyFrame, columns: &[String]) -> Result<()> {
    for name in columns {
        let flipped: Vec<Option<f64>> = extract(frame, name)?
            .iter()
            .map(|value| value.map(|v| -v))
            .collect();
        frame
            .data_mut()
            .with_column(Series::new(name.as_str().into(), flipped))?;
        debug!(column = %name, "flipped column direction");
    }
    Ok(())
}

fn extract(frame: &ProxyFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if !frame.proxies().iter().any(|p| p == name) {
        return Err(CogresError::InvalidInput(format!(
            "column '{name}' is not one of the selected proxies"
        )));
    }
    let series = frame.data().column(name)?;
    let mut out = Vec::with_capacity(frame.record_count());
    for idx in 0..frame.record_count() {
        out.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn frame(values: Vec<Option<f64>>) -> ProxyFrame {
        let subjects: Vec<String> = (1..=values.len()).map(|i| format!("s{i}")).collect();
        let cols: Vec<Column> = vec![
            Series::new("subid".into(), &subjects).into(),
            Series::new("edu".into(), &values).into(),
        ];
        ProxyFrame::new(
            DataFrame::new(cols).unwrap(),
            "subid",
            vec!["edu".to_string()],
        )
        .unwrap()
    }

    fn column(frame: &ProxyFrame) -> Vec<Option<f64>> {
        let series = frame.data().column("edu").unwrap();
        (0..frame.record_count())
            .map(|idx| any_to_f64(series.get(idx).unwrap()))
            .collect()
    }

    #[test]
    fn zscore_uses_population_std() {
        let mut f = frame(vec![Some(2.0), Some(4.0), Some(6.0)]);
        zscore_columns(&mut f, &["edu".to_string()]).unwrap();
        // mean 4, population std sqrt(8/3)
        let std = (8.0f64 / 3.0).sqrt();
        let scored = column(&f);
        assert!((scored[0].unwrap() - (-2.0 / std)).abs() < 1e-12);
        assert!((scored[1].unwrap() - 0.0).abs() < 1e-12);
        assert!((scored[2].unwrap() - (2.0 / std)).abs() < 1e-12);
    }

    #[test]
    fn zscore_preserves_missing() {
        let mut f = frame(vec![Some(1.0), None, Some(3.0)]);
        zscore_columns(&mut f, &["edu".to_string()]).unwrap();
        assert!(column(&f)[1].is_none());
    }

    #[test]
    fn zscore_rejects_constant_column() {
        let mut f = frame(vec![Some(5.0), Some(5.0)]);
        let err = zscore_columns(&mut f, &["edu".to_string()]).unwrap_err();
        assert!(err.to_string().contains("constant"));
    }

    #[test]
    fn flip_negates_and_keeps_missing() {
        let mut f = frame(vec![Some(1.5), None]);
        flip_columns(&mut f, &["edu".to_string()]).unwrap();
        assert_eq!(column(&f), vec![Some(-1.5), None]);
    }

    #[test]
    fn unknown_column_is_invalid_input() {
        let mut f = frame(vec![Some(1.0)]);
        let err = zscore_columns(&mut f, &["occu".to_string()]).unwrap_err();
        assert!(matches!(err, CogresError::InvalidInput(_)));
    }
}
