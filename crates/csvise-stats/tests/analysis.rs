use csvise_ingest::{DelimiterConfig, parse_str};
use csvise_stats::{
    Correlation, OutlierMethod, OutlierReport, StatsError, StatsOptions, correlation_matrix,
    describe_all, detect_outliers, quality_report, value_distribution,
};

const EMPLOYEES: &str = "\
name;dept;age;salary
ann;eng;31;5200
bob;ops;45;4100
cy;eng;28;4800
di;eng;39;6100
ed;ops;52;3900
fay;sales;;4500
";

fn table() -> csvise_model::Table {
    parse_str(EMPLOYEES, &DelimiterConfig::new()).expect("parse employees")
}

#[test]
fn describes_every_column() {
    let stats = describe_all(&table(), None, &StatsOptions::default()).expect("describe");
    assert_eq!(stats.len(), 4);

    let age = &stats[2];
    assert_eq!(age.empty, 1);
    let summary = age.numeric.as_ref().expect("age is numeric");
    assert_eq!(summary.count, 5);
    assert_eq!(summary.min, 28.0);
    assert_eq!(summary.max, 52.0);
    assert_eq!(summary.median, 39.0);

    let dept = stats[1].categorical.as_ref().expect("dept is text");
    assert_eq!(dept.most_common.as_ref().map(|v| v.value.as_str()), Some("eng"));
}

#[test]
fn correlation_is_symmetric_with_unit_diagonal() {
    let matrix = correlation_matrix(&table(), None).expect("correlate");
    assert_eq!(matrix.columns, vec!["age", "salary"]);
    assert_eq!(matrix.get(0, 0), Some(Correlation::Value(1.0)));
    assert_eq!(matrix.get(1, 1), Some(Correlation::Value(1.0)));
    assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
    let r = matrix.get(0, 1).and_then(Correlation::value).expect("defined");
    assert!(r < 0.0);
}

#[test]
fn outliers_need_four_values() {
    let small = parse_str("v\n1\n2\n3\n", &DelimiterConfig::new()).expect("parse");
    let report = detect_outliers(&small, "v", OutlierMethod::iqr()).expect("detect");
    assert!(matches!(
        report,
        OutlierReport::InsufficientData {
            required: 4,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn unknown_columns_are_reported() {
    let err = value_distribution(&table(), "city", 5).unwrap_err();
    assert_eq!(err, StatsError::ColumnNotFound { name: "city".into() });
}

#[test]
fn quality_of_clean_table() {
    let report = quality_report(&table());
    assert_eq!(report.duplicate_rows, 0);
    assert_eq!(report.inconsistent_rows, 0);
    assert_eq!(report.empty_cells, 1);
    assert!((report.completeness - 23.0 / 24.0).abs() < 1e-12);
}

#[test]
fn overflowing_literals_stay_out_of_numeric_results() {
    let table = parse_str("x,y\n1,2\n2,4\n1e999,5\n3,7\n", &DelimiterConfig::new()).expect("parse");
    let matrix = correlation_matrix(&table, None).expect("correlate");
    let r = matrix
        .get_by_name("x", "y")
        .and_then(Correlation::value)
        .expect("defined");
    assert!(r.is_finite() && r > 0.9);

    let stats = describe_all(&table, None, &StatsOptions::default()).expect("describe");
    let x = stats[0].numeric.as_ref().expect("x is numeric");
    assert_eq!(x.count, 3);
    assert_eq!(x.max, 3.0);
}
