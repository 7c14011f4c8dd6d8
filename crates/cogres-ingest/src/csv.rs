//! CSV loading of proxy tables and CSV persistence of derived tables.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::{AnyValue, CsvReadOptions, CsvWriter, DataFrame, DataType, SerReader, SerWriter};
use tracing::debug;

use cogres_model::ProxyFrame;

use crate::polars_utils::{any_to_string, is_missing_value};

/// Read a CSV file as-is, without proxy selection or casting. Used for
/// questionnaire layouts that the scorers interpret themselves.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open CSV: {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to read CSV: {}", path.display()))
}

/// Read a subject-keyed proxy table from a CSV file.
///
/// The subject column must exist and its values must be unique. When
/// `proxies` is `None`, every other column is treated as a proxy, in file
/// order. Proxy columns are cast to `Float64`; cells that fail to parse
/// become the missing marker (null).
pub fn read_proxy_csv(
    path: &Path,
    subject_col: &str,
    proxies: Option<&[String]>,
) -> Result<ProxyFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open CSV: {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to read CSV: {}", path.display()))?;

    if df.column(subject_col).is_err() {
        bail!(
            "subject column '{subject_col}' not found in {}",
            path.display()
        );
    }
    check_unique_subjects(&df, subject_col)?;

    let proxies: Vec<String> = match proxies {
        Some(names) => names.to_vec(),
        None => df
            .get_column_names()
            .iter()
            .filter(|name| name.as_str() != subject_col)
            .map(|name| name.to_string())
            .collect(),
    };

    for name in &proxies {
        let column = df
            .column(name)
            .with_context(|| format!("proxy column '{name}' not found in {}", path.display()))?;
        let cast = column
            .cast(&DataType::Float64)
            .with_context(|| format!("proxy column '{name}' is not numeric"))?;
        df.with_column(cast)?;
    }

    debug!(
        rows = df.height(),
        proxies = proxies.len(),
        path = %path.display(),
        "loaded proxy table"
    );
    ProxyFrame::new(df, subject_col, proxies).map_err(Into::into)
}

/// Write a derived table (composites or questionnaire scores) as CSV.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("failed to write CSV: {}", path.display()))?;
    Ok(())
}

fn check_unique_subjects(df: &DataFrame, subject_col: &str) -> Result<()> {
    let series = df.column(subject_col)?;
    let mut seen = BTreeSet::new();
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_value(&value) {
            bail!("blank subject identifier at row {}", idx + 1);
        }
        let id = any_to_string(value);
        if !seen.insert(id.clone()) {
            bail!("duplicate subject identifier '{id}'");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_infers_proxies_and_propagates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxies.csv");
        std::fs::write(&path, "subid,edu,occu\ns1,12,3.5\ns2,16,\n").unwrap();

        let frame = read_proxy_csv(&path, "subid", None).unwrap();
        assert_eq!(frame.proxies(), ["edu", "occu"]);
        assert_eq!(frame.record_count(), 2);

        let occu = frame.data().column("occu").unwrap();
        assert_eq!(occu.get(0).unwrap(), AnyValue::Float64(3.5));
        assert!(occu.get(1).unwrap().is_null());
    }

    #[test]
    fn read_rejects_duplicate_subjects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        std::fs::write(&path, "subid,edu\ns1,12\ns1,16\n").unwrap();

        let err = read_proxy_csv(&path, "subid", None).unwrap_err();
        assert!(err.to_string().contains("duplicate subject"));
    }

    #[test]
    fn read_honours_explicit_proxy_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxies.csv");
        std::fs::write(&path, "subid,edu,occu,age\ns1,12,3.5,70\n").unwrap();

        let selected = vec!["edu".to_string(), "occu".to_string()];
        let frame = read_proxy_csv(&path, "subid", Some(&selected)).unwrap();
        assert_eq!(frame.proxies(), ["edu", "occu"]);
    }

    #[test]
    fn write_round_trips_through_polars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("scores.csv");
        let source = dir.path().join("in.csv");
        std::fs::write(&source, "subid,edu\ns1,12\ns2,16\n").unwrap();

        let frame = read_proxy_csv(&source, "subid", None).unwrap();
        let mut df = frame.data().clone();
        write_csv(&mut df, &path).unwrap();

        let again = read_proxy_csv(&path, "subid", None).unwrap();
        assert_eq!(again.record_count(), 2);
    }
}
