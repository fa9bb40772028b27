use std::fs;

use csvise_cli::config::{CsviseConfig, StringCase};
use csvise_model::CaseStyle;

#[test]
fn default_config_json() {
    insta::assert_json_snapshot!(CsviseConfig::default(), @r#"
    {
      "additional_delimiters": [],
      "start_index": 1,
      "num_rows_to_print": null,
      "display_column_lines": false,
      "display_row_lines": false,
      "check_type_mismatches": true,
      "string_case": "default"
    }
    "#);
}

#[test]
fn loads_explicit_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "additional_delimiters": ["~", "::"],
            "num_rows_to_print": 5,
            "display_column_lines": true,
            "check_type_mismatches": false,
            "string_case": "sentence"
        }"#,
    )
    .expect("write config");

    let config = CsviseConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.additional_delimiters, vec!["~", "::"]);
    assert_eq!(config.string_case, StringCase::Sentence);
    assert!(!config.validation_options().check_types);

    let display = config.display_options();
    assert_eq!(display.row_limit, Some(5));
    assert!(display.column_lines);
    assert!(!display.row_lines);
    assert_eq!(display.case, Some(CaseStyle::Sentence));

    let delimiters = config.delimiter_config(Some(";".to_string()));
    assert_eq!(delimiters.override_delimiter.as_deref(), Some(";"));
    assert_eq!(&delimiters.candidates()[..2], &["~", "::"]);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    let err = CsviseConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn malformed_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"start_index\": \"one\" }").expect("write config");
    let err = CsviseConfig::load(Some(&path)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("broken.json"), "{message}");
    assert!(message.contains("invalid type"), "{message}");
}
