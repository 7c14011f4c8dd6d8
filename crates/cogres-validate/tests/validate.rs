//! Validator scenarios: clean pass, naming collision, incomplete table,
//! tampered arithmetic, unresolvable names.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use cogres_composite::build_composites;
use cogres_model::{
    CheckKind, CompositeColumn, CompositeFrame, CompositeOptions, ProxyFrame,
};
use cogres_validate::{validate_composites, write_validation_report_json};

fn proxy_frame(names: &[&str], columns: &[Vec<Option<f64>>]) -> ProxyFrame {
    let rows = columns.first().map_or(0, Vec::len);
    let subjects: Vec<String> = (1..=rows).map(|i| format!("s{i}")).collect();
    let mut cols: Vec<Column> = vec![Series::new("subid".into(), &subjects).into()];
    for (name, values) in names.iter().zip(columns) {
        cols.push(Series::new((*name).into(), values).into());
    }
    let data = DataFrame::new(cols).unwrap();
    ProxyFrame::new(data, "subid", names.iter().map(|s| s.to_string()).collect()).unwrap()
}

fn seeded_options() -> CompositeOptions {
    CompositeOptions::default().with_seed(Some(7))
}

#[test]
fn clean_build_passes_all_checks() {
    let frame = proxy_frame(
        &["edu", "occu", "iq"],
        &[
            vec![Some(1.0), Some(2.0), None],
            vec![Some(0.5), None, Some(1.5)],
            vec![Some(-1.0), Some(0.0), Some(1.0)],
        ],
    );
    let options = seeded_options();
    let composites = build_composites(&frame, &options).unwrap().frame;
    let report = validate_composites(&frame, &composites, &options);

    assert_eq!(report.error_count(), 0);
    assert!(report.check_passed(CheckKind::Uniqueness));
    assert!(report.check_passed(CheckKind::Completeness));
    assert!(report.check_passed(CheckKind::SpotCheck));
    assert_eq!(report.spot_checked.len(), 5);
}

#[test]
fn underscore_in_proxy_names_triggers_uniqueness_collision() {
    // {a_b} alone and {a, b} both name themselves "a_b".
    let frame = proxy_frame(
        &["a", "a_b", "b"],
        &[
            vec![Some(1.0)],
            vec![Some(2.0)],
            vec![Some(3.0)],
        ],
    );
    let options = seeded_options();
    let composites = build_composites(&frame, &options).unwrap().frame;
    let report = validate_composites(&frame, &composites, &options);

    assert!(!report.check_passed(CheckKind::Uniqueness));
    let collision = report
        .issues
        .iter()
        .find(|issue| issue.check == CheckKind::Uniqueness)
        .expect("uniqueness issue");
    assert_eq!(collision.column.as_deref(), Some("a_b"));
    assert_eq!(collision.count, Some(2));
}

#[test]
fn missing_column_fails_completeness_only() {
    let frame = proxy_frame(
        &["edu", "occu"],
        &[vec![Some(1.0)], vec![Some(2.0)]],
    );
    let options = seeded_options();
    let built = build_composites(&frame, &options).unwrap().frame;

    // Drop the last composite to break the combinatorial count.
    let mut columns = built.columns().to_vec();
    columns.pop();
    let truncated =
        CompositeFrame::new(built.subject_col(), built.subjects().to_vec(), columns);

    let report = validate_composites(&frame, &truncated, &options);
    assert!(report.check_passed(CheckKind::Uniqueness));
    assert!(!report.check_passed(CheckKind::Completeness));
    let issue = report
        .issues
        .iter()
        .find(|issue| issue.check == CheckKind::Completeness)
        .expect("completeness issue");
    assert!(issue.message.contains("expected 3"));
}

#[test]
fn spot_check_catches_tampered_values() {
    let frame = proxy_frame(
        &["edu", "occu"],
        &[vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]],
    );
    // Sample size larger than the table guarantees the bad column is drawn.
    let options = seeded_options().with_spot_check_sample(64);
    let built = build_composites(&frame, &options).unwrap().frame;

    let mut columns = built.columns().to_vec();
    let tampered = columns
        .iter_mut()
        .find(|column| column.name == "edu_occu")
        .expect("pair column");
    tampered.values[1] = Some(99.0);
    let corrupted =
        CompositeFrame::new(built.subject_col(), built.subjects().to_vec(), columns);

    let report = validate_composites(&frame, &corrupted, &options);
    assert!(!report.check_passed(CheckKind::SpotCheck));
    let issue = report
        .issues
        .iter()
        .find(|issue| issue.check == CheckKind::SpotCheck)
        .expect("spot-check issue");
    assert_eq!(issue.column.as_deref(), Some("edu_occu"));
    assert_eq!(issue.count, Some(1));
}

#[test]
fn spot_check_reports_unresolvable_name_fragments() {
    let frame = proxy_frame(&["edu", "occu"], &[vec![Some(1.0)], vec![Some(2.0)]]);
    let options = seeded_options().with_spot_check_sample(64);

    let stray = CompositeColumn {
        name: "edu_unknown".to_string(),
        values: vec![Some(0.0)],
    };
    let built = build_composites(&frame, &options).unwrap().frame;
    let mut columns = built.columns().to_vec();
    columns.push(stray);
    let frame_with_stray =
        CompositeFrame::new(built.subject_col(), built.subjects().to_vec(), columns);

    let report = validate_composites(&frame, &frame_with_stray, &options);
    let issue = report
        .issues
        .iter()
        .find(|issue| issue.column.as_deref() == Some("edu_unknown"))
        .expect("unresolvable-name issue");
    assert!(issue.message.contains("not a known proxy"));
}

#[test]
fn report_json_is_written_with_schema_tag() {
    let frame = proxy_frame(&["edu"], &[vec![Some(1.0)]]);
    let options = seeded_options();
    let composites = build_composites(&frame, &options).unwrap().frame;
    let report = validate_composites(&frame, &composites, &options);

    let dir = tempfile::tempdir().unwrap();
    let path = write_validation_report_json(dir.path(), &report).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("cogres.validation-report"));
    assert!(text.contains("\"error_count\": 0"));
}
