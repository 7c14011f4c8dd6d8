//! Human-readable result tables for the terminal.

use std::cmp::Ordering;
use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Color, Table};

use cogres_model::{CheckKind, IssueSeverity, ValidationReport};

use crate::commands::ScoreResult;
use crate::pipeline::CompositesResult;

pub fn print_composites_summary(result: &CompositesResult) {
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.report_json {
        println!("Validation report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for check in [
        CheckKind::Uniqueness,
        CheckKind::Completeness,
        CheckKind::SpotCheck,
    ] {
        let errors = issue_count(&result.report, check, IssueSeverity::Error);
        let warnings = issue_count(&result.report, check, IssueSeverity::Warning);
        table.add_row(vec![
            Cell::new(check_label(check))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(errors == 0),
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    println!("{table}");

    println!(
        "Subjects: {}  Proxies: {}  Composites: {}  Spot-checked: {}",
        result.subjects,
        result.proxies.len(),
        result.composite_count,
        result.report.spot_checked.len()
    );
    for warning in &result.warnings {
        println!("Warning: {warning}");
    }
    match &result.composites_csv {
        Some(path) => println!("Composites: {}", path.display()),
        None if result.has_errors() => {
            println!("Composites: not written (validation errors)");
        }
        None => println!("Composites: not written (dry run)"),
    }

    print_issue_table(&result.report);
}

pub fn print_score_summary(result: &ScoreResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Questionnaire"),
        header_cell("Subjects"),
        header_cell("Columns"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(result.questionnaire.to_uppercase())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(result.subjects),
        Cell::new(result.columns.join(", ")),
        output_cell(result.output_csv.as_ref()),
    ]);
    println!("{table}");
}

fn print_issue_table(report: &ValidationReport) {
    if report.issues.is_empty() {
        return;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.column.cmp(&b.column)
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Severity"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            Cell::new(check_label(issue.check)),
            severity_cell(issue.severity),
            Cell::new(issue.column.clone().unwrap_or_else(|| "-".to_string())),
            match issue.count {
                Some(count) => Cell::new(count),
                None => dim_cell("-"),
            },
            Cell::new(issue.message.clone()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn check_label(check: CheckKind) -> &'static str {
    match check {
        CheckKind::Uniqueness => "uniqueness",
        CheckKind::Completeness => "completeness",
        CheckKind::SpotCheck => "spot check",
    }
}

fn issue_count(report: &ValidationReport, check: CheckKind, severity: IssueSeverity) -> usize {
    report
        .issues
        .iter()
        .filter(|issue| issue.check == check && issue.severity == severity)
        .count()
}

fn status_cell(passed: bool) -> Cell {
    if passed {
        Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display().to_string())
            .fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
