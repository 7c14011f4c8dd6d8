//! Social Network Index (Cohen) scoring.
//!
//! Implements the Cohen SNI scoring sheet: number of high-contact roles
//! (network diversity), number of people in the social network, and number
//! of embedded networks. Input columns are matched by name (`SNI_1`,
//! `SNI_2a`, ..., `SNI_12f_number`) plus a subject-id column. Data must be
//! pre-cleaned; missing responses are expected to be zero.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use cogres_model::Result;

use crate::common::{named_cell_or_zero, subject_ids};

/// Binarized role questions besides spouse and employee.
const ROLE_COLS: [&str; 10] = [
    "SNI_2a", "SNI_3a", "SNI_4a", "SNI_5a", "SNI_6a", "SNI_7a", "SNI_8a", "SNI_10", "SNI_11",
    "SNI_12",
];

/// Raw head counts summed directly into the people score.
const PEOPLE_COLS: [&str; 15] = [
    "SNI_2a",
    "SNI_5a",
    "SNI_6a",
    "SNI_7a",
    "SNI_8a",
    "SNI_9a",
    "SNI_9b",
    "SNI_10",
    "SNI_11a",
    "SNI_12a_number",
    "SNI_12b_number",
    "SNI_12c_number",
    "SNI_12d_number",
    "SNI_12e_number",
    "SNI_12f_number",
];

const GROUP_COLS: [&str; 6] = [
    "SNI_12a_number",
    "SNI_12b_number",
    "SNI_12c_number",
    "SNI_12d_number",
    "SNI_12e_number",
    "SNI_12f_number",
];

const FAMILY_COLS: [&str; 4] = ["SNI_2a", "SNI_3a", "SNI_4a", "SNI_5a"];

/// Score the SNI. Returns a frame with columns `subid`, `SNI_Roles`,
/// `SNI_People`, and `SNI_Networks`.
pub fn score_sni(df: &DataFrame, subject_col: &str) -> Result<DataFrame> {
    let rows = df.height();
    let subjects = subject_ids(df, subject_col)?;

    let mut roles_scores = Vec::with_capacity(rows);
    let mut people_scores = Vec::with_capacity(rows);
    let mut network_scores = Vec::with_capacity(rows);

    for row in 0..rows {
        // The spouse question only counts when answered exactly 1 (married);
        // other codes (partner, never married, divorced) score 0.
        let spouse = if named_cell_or_zero(df, "SNI_1", row)? == 1.0 {
            1.0
        } else {
            0.0
        };
        // Employee counts as one role only when both the co-worker questions
        // (9a, 9b) were endorsed.
        let employee = if named_cell_or_zero(df, "SNI_9a", row)? != 0.0
            && named_cell_or_zero(df, "SNI_9b", row)? != 0.0
        {
            1.0
        } else {
            0.0
        };

        roles_scores.push(roles_score(df, row, spouse, employee)?);
        people_scores.push(people_score(df, row, spouse)?);
        network_scores.push(networks_score(df, row, spouse)?);
    }

    debug!(subjects = rows, "scored SNI");
    let columns: Vec<Column> = vec![
        Series::new("subid".into(), &subjects).into(),
        Series::new("SNI_Roles".into(), &roles_scores).into(),
        Series::new("SNI_People".into(), &people_scores).into(),
        Series::new("SNI_Networks".into(), &network_scores).into(),
    ];
    DataFrame::new(columns).map_err(Into::into)
}

/// Network diversity: one point per high-contact role.
fn roles_score(df: &DataFrame, row: usize, spouse: f64, employee: f64) -> Result<f64> {
    let mut total = spouse + employee;
    for name in ROLE_COLS {
        if named_cell_or_zero(df, name, row)? != 0.0 {
            total += 1.0;
        }
    }
    Ok(total)
}

/// People in network: raw head counts, with the parents / parents-in-law
/// questions recoded from the answer scale (1 = one parent, 2 = one parent,
/// 3 = both) to a head count.
fn people_score(df: &DataFrame, row: usize, spouse: f64) -> Result<f64> {
    let mut total = spouse;
    for name in PEOPLE_COLS {
        total += named_cell_or_zero(df, name, row)?;
    }
    for name in ["SNI_3a", "SNI_4a"] {
        total += parent_head_count(named_cell_or_zero(df, name, row)?);
    }
    Ok(total)
}

fn parent_head_count(answer: f64) -> f64 {
    match answer {
        a if a == 1.0 || a == 2.0 => 1.0,
        a if a == 3.0 => 2.0,
        other => other,
    }
}

/// Embedded networks: one point per network of at least 4 high-contact
/// people. The family network instead needs both at least 3 high-contact
/// family roles and at least 4 family members for its single point.
fn networks_score(df: &DataFrame, row: usize, spouse: f64) -> Result<f64> {
    let mut total = 0.0;
    for name in ["SNI_6a", "SNI_7a", "SNI_8a", "SNI_10", "SNI_11a"] {
        if named_cell_or_zero(df, name, row)? >= 4.0 {
            total += 1.0;
        }
    }

    let work = named_cell_or_zero(df, "SNI_9a", row)? + named_cell_or_zero(df, "SNI_9b", row)?;
    if work >= 4.0 {
        total += 1.0;
    }

    let mut groups = 0.0;
    for name in GROUP_COLS {
        groups += named_cell_or_zero(df, name, row)?;
    }
    if groups >= 4.0 {
        total += 1.0;
    }

    let mut family_roles = if spouse != 0.0 { 1.0 } else { 0.0 };
    let mut family_members = spouse;
    for name in FAMILY_COLS {
        let answer = named_cell_or_zero(df, name, row)?;
        if answer != 0.0 {
            family_roles += 1.0;
        }
        family_members += answer;
    }
    if family_roles >= 3.0 && family_members >= 4.0 {
        total += 1.0;
    }

    Ok(total)
}
