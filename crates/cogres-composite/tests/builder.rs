//! End-to-end builder scenarios.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

use cogres_composite::{build_composites, subset_count};
use cogres_model::{Aggregation, CogresError, CompositeOptions, ProxyFrame};

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

#[test]
fn mean_composites_for_two_proxies() {
    let frame = proxy_frame(
        &["A", "B"],
        &[vec![Some(1.0), Some(2.0)], vec![Some(3.0), None]],
    );
    let build = build_composites(&frame, &CompositeOptions::default()).unwrap();
    let table = build.frame;

    assert_eq!(table.composite_names(), vec!["A", "B", "A_B"]);
    assert_eq!(table.column("A").unwrap().values, vec![Some(1.0), Some(2.0)]);
    assert_eq!(table.column("B").unwrap().values, vec![Some(3.0), None]);
    assert_eq!(table.column("A_B").unwrap().values, vec![Some(2.0), None]);
    assert!(build.warnings.is_empty());
}

#[test]
fn sum_composites_for_two_proxies() {
    let frame = proxy_frame(
        &["A", "B"],
        &[vec![Some(1.0), Some(2.0)], vec![Some(3.0), None]],
    );
    let options = CompositeOptions::default().with_aggregation(Aggregation::Sum);
    let table = build_composites(&frame, &options).unwrap().frame;
    assert_eq!(table.column("A_B").unwrap().values, vec![Some(4.0), None]);
}

#[test]
fn three_proxies_yield_seven_or_four_columns() {
    let frame = proxy_frame(
        &["edu", "occu", "iq"],
        &[
            vec![Some(1.0)],
            vec![Some(2.0)],
            vec![Some(3.0)],
        ],
    );
    let full = build_composites(&frame, &CompositeOptions::default()).unwrap();
    assert_eq!(full.frame.composite_count(), 7);
    assert_eq!(
        full.frame.composite_names(),
        vec!["edu", "occu", "iq", "edu_occu", "edu_iq", "occu_iq", "edu_occu_iq"]
    );

    let pairs_up = CompositeOptions::default().with_min_subset_size(2);
    let trimmed = build_composites(&frame, &pairs_up).unwrap();
    assert_eq!(trimmed.frame.composite_count(), 4);
    assert_eq!(
        trimmed.frame.composite_names(),
        vec!["edu_occu", "edu_iq", "occu_iq", "edu_occu_iq"]
    );
}

#[test]
fn size_one_composites_reproduce_source_columns() {
    let frame = proxy_frame(
        &["edu", "occu"],
        &[vec![Some(0.5), None, Some(-1.0)], vec![Some(2.0), Some(1.0), None]],
    );
    let table = build_composites(&frame, &CompositeOptions::default())
        .unwrap()
        .frame;
    assert_eq!(
        table.column("edu").unwrap().values,
        vec![Some(0.5), None, Some(-1.0)]
    );
    assert_eq!(
        table.column("occu").unwrap().values,
        vec![Some(2.0), Some(1.0), None]
    );
}

#[test]
fn builder_rejects_out_of_range_min_size() {
    let frame = proxy_frame(&["edu"], &[vec![Some(1.0)]]);
    let options = CompositeOptions::default().with_min_subset_size(0);
    let err = build_composites(&frame, &options).unwrap_err();
    assert!(matches!(err, CogresError::InvalidInput(_)));

    let options = CompositeOptions::default().with_min_subset_size(3);
    assert!(build_composites(&frame, &options).is_err());
}

#[test]
fn scale_warning_is_surfaced_before_enumeration() {
    let names: Vec<String> = (0..4).map(|i| format!("p{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let columns: Vec<Vec<Option<f64>>> = (0..4).map(|i| vec![Some(f64::from(i))]).collect();
    let frame = proxy_frame(&name_refs, &columns);

    let mut options = CompositeOptions::default();
    options.scale_warning_threshold = 3;
    let build = build_composites(&frame, &options).unwrap();
    assert_eq!(build.warnings.len(), 1);
    assert!(build.warnings[0].contains("15 subsets"));
    // The warning does not suppress the result.
    assert_eq!(build.frame.composite_count(), 15);
}

proptest! {
    #[test]
    fn column_count_matches_closed_form(
        n in 1usize..=7,
        min_size in 1usize..=2,
        missing_mask in prop::collection::vec(prop::collection::vec(any::<bool>(), 3), 7),
    ) {
        prop_assume!(min_size <= n);
        let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let columns: Vec<Vec<Option<f64>>> = (0..n)
            .map(|i| {
                (0..3)
                    .map(|row| {
                        if missing_mask[i][row] {
                            None
                        } else {
                            Some((i * 3 + row) as f64)
                        }
                    })
                    .collect()
            })
            .collect();
        let frame = proxy_frame(&name_refs, &columns);
        let options = CompositeOptions::default().with_min_subset_size(min_size);

        let first = build_composites(&frame, &options).unwrap().frame;
        prop_assert_eq!(first.composite_count() as u128, subset_count(n, min_size));

        // Missing propagation: a composite row is missing exactly when any
        // member row is missing.
        for column in first.columns() {
            let members: Vec<usize> = column
                .name
                .split('_')
                .map(|piece| names.iter().position(|p| p == piece).unwrap())
                .collect();
            for row in 0..3 {
                let any_missing = members.iter().any(|&m| columns[m][row].is_none());
                prop_assert_eq!(column.values[row].is_none(), any_missing);
            }
        }

        // Idempotence: a second run reproduces names and values exactly.
        let second = build_composites(&frame, &options).unwrap().frame;
        prop_assert_eq!(first.composite_names(), second.composite_names());
        for (a, b) in first.columns().iter().zip(second.columns()) {
            prop_assert_eq!(&a.values, &b.values);
        }
    }
}
