use csvise_cli::render::{DisplayOptions, data_table, render_plain};
use csvise_ingest::{DelimiterConfig, parse_str};
use csvise_model::CaseStyle;
use csvise_validate::{ValidationOptions, validate};

const SAMPLE: &str = "Name,Age,Occupation
Alice,30,Engineer
Bob,25,Designer
Charlie,Manager
Diana,28,7
Edward,40.5,Developer
";

#[test]
fn plain_view_with_column_lines_and_case() {
    let table = parse_str(SAMPLE, &DelimiterConfig::new()).expect("parse sample");
    let options = DisplayOptions {
        column_lines: true,
        case: Some(CaseStyle::Upper),
        ..DisplayOptions::default()
    };
    let expected = [
        "  | NAME    | AGE     | OCCUPATION",
        "------------+---------+------------",
        "1 | ALICE   | 30      | ENGINEER",
        "2 | BOB     | 25      | DESIGNER",
        "3 | CHARLIE | MANAGER |",
        "4 | DIANA   | 28      | 7",
        "5 | EDWARD  | 40.5    | DEVELOPER",
    ]
    .join("\n");
    assert_eq!(render_plain(&table, &options, None), expected);
}

#[test]
fn plain_view_window_with_report() {
    let table = parse_str(SAMPLE, &DelimiterConfig::new()).expect("parse sample");
    let report = validate(&table, &ValidationOptions::default());
    let options = DisplayOptions {
        start_index: 4,
        row_limit: Some(1),
        ..DisplayOptions::default()
    };
    let text = render_plain(&table, &options, Some(&report));
    let (view, rest) = text.split_once("\n\n").expect("report follows table");
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "4   Diana     28        7");
    insta::assert_snapshot!(rest.to_string(), @r"
    ROWS WITH INCORRECT LENGTH:
    Row 3 is of length 2, expected 3

    ROWS WITH POTENTIAL TYPE MISMATCHES:
    Row 3, Column 2: Found str, expected int
    Row 4, Column 3: Found int, expected str

    Total number of rows with incorrect length: 1
    Total number of type mismatches: 2
    ");
}

#[test]
fn terminal_view_has_a_row_per_visible_record() {
    let table = parse_str(SAMPLE, &DelimiterConfig::new()).expect("parse sample");
    let options = DisplayOptions {
        row_limit: Some(2),
        ..DisplayOptions::default()
    };
    let mut view = data_table(&table, &options, None);
    view.force_no_tty();
    let text = view.to_string();
    assert!(text.contains("Alice"));
    assert!(text.contains("Bob"));
    assert!(!text.contains("Charlie"));
    assert_eq!(view.row_iter().count(), 2);
}

#[test]
fn analysis_tables_render_their_rows() {
    use csvise_cli::summary::{outlier_summary, quality_table, stats_table};
    use csvise_stats::{OutlierMethod, StatsOptions, describe_all, detect_outliers, quality_report};

    let table = parse_str(SAMPLE, &DelimiterConfig::new()).expect("parse sample");

    let stats = describe_all(&table, None, &StatsOptions::default()).expect("describe");
    let mut view = stats_table(&stats);
    view.force_no_tty();
    assert_eq!(view.row_iter().count(), 3);
    assert!(view.to_string().contains("Occupation"));

    let mut view = quality_table(&quality_report(&table));
    view.force_no_tty();
    assert!(view.to_string().contains("Overall"));

    let report = detect_outliers(&table, "Age", OutlierMethod::iqr()).expect("outliers");
    assert_eq!(
        outlier_summary(&report),
        "Age: 0 of 4 values outside [19.1875, 40.6875] (0.0%) using IQR (k = 1.5)"
    );
}
