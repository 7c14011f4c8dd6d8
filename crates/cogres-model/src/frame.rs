use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{CogresError, Result};

/// A subject-keyed table of proxy variables.
///
/// Wraps a polars [`DataFrame`] together with the name of the
/// subject-identifier column and the ordered list of proxy columns selected
/// for composite generation. The proxy ordering is significant: it drives
/// both subset enumeration order and composite naming.
#[derive(Debug, Clone)]
pub struct ProxyFrame {
    data: DataFrame,
    subject_col: String,
    proxies: Vec<String>,
}

impl ProxyFrame {
    /// Create a proxy frame, checking that the subject column and every
    /// proxy column exist and that the proxy list is non-empty and free of
    /// duplicates.
    pub fn new(
        data: DataFrame,
        subject_col: impl Into<String>,
        proxies: Vec<String>,
    ) -> Result<Self> {
        let subject_col = subject_col.into();
        check_proxy_names(&data, &subject_col, &proxies)?;
        Ok(Self {
            data,
            subject_col,
            proxies,
        })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataFrame {
        &mut self.data
    }

    pub fn subject_col(&self) -> &str {
        &self.subject_col
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}

/// One generated composite column: the joined name and the per-subject
/// aggregates, missing where any member value was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Output of the composite builder: the same subject index with one column
/// per enumerated subset, in enumeration order. Immutable after build.
///
/// Stored as plain columns rather than a [`DataFrame`] so that colliding
/// composite names survive long enough for the validator to flag them;
/// polars rejects duplicate column names at construction.
#[derive(Debug, Clone)]
pub struct CompositeFrame {
    subject_col: String,
    subjects: Vec<String>,
    columns: Vec<CompositeColumn>,
}

impl CompositeFrame {
    pub fn new(
        subject_col: impl Into<String>,
        subjects: Vec<String>,
        columns: Vec<CompositeColumn>,
    ) -> Self {
        Self {
            subject_col: subject_col.into(),
            subjects,
            columns,
        }
    }

    pub fn subject_col(&self) -> &str {
        &self.subject_col
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn columns(&self) -> &[CompositeColumn] {
        &self.columns
    }

    /// First column with the given name, if any.
    pub fn column(&self, name: &str) -> Option<&CompositeColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn record_count(&self) -> usize {
        self.subjects.len()
    }

    /// Composite column names in enumeration order.
    pub fn composite_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn composite_count(&self) -> usize {
        self.columns.len()
    }

    /// Convert to a polars [`DataFrame`] for persistence or display.
    ///
    /// Fails when composite names collide; a table that failed the
    /// uniqueness check cannot be materialized.
    pub fn to_data_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Series::new(self.subject_col.as_str().into(), &self.subjects).into());
        for column in &self.columns {
            columns.push(Series::new(column.name.as_str().into(), &column.values).into());
        }
        DataFrame::new(columns).map_err(Into::into)
    }
}

/// Shared input validation for proxy selections.
///
/// Rejects empty lists, duplicate names, names that collide with the
/// subject column, and names absent from the frame.
pub fn check_proxy_names(data: &DataFrame, subject_col: &str, proxies: &[String]) -> Result<()> {
    if data.column(subject_col).is_err() {
        return Err(CogresError::InvalidInput(format!(
            "subject column '{subject_col}' not found in table"
        )));
    }
    if proxies.is_empty() {
        return Err(CogresError::InvalidInput(
            "proxy list is empty".to_string(),
        ));
    }
    let mut seen = BTreeSet::new();
    for name in proxies {
        if name == subject_col {
            return Err(CogresError::InvalidInput(format!(
                "proxy '{name}' collides with the subject column"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(CogresError::InvalidInput(format!(
                "duplicate proxy name '{name}'"
            )));
        }
        if data.column(name).is_err() {
            return Err(CogresError::InvalidInput(format!(
                "proxy column '{name}' not found in table"
            )));
        }
    }
    Ok(())
}
