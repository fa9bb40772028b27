use std::fs;
use std::path::PathBuf;

use csvise_ingest::{DelimiterConfig, IngestError, read_table};
use csvise_model::TypeTag;

fn temp_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_sample_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(
        &dir,
        "people.csv",
        "Name,Age,Occupation\n\
         Alice,30,Engineer\n\
         Bob,25,Designer\n\
         Charlie,Manager\n\
         Diana,28,7\n\
         Edward,40.5,Developer\n",
    );
    let table = read_table(&path, &DelimiterConfig::new()).expect("read table");

    assert_eq!(table.header(), vec!["Name", "Age", "Occupation"]);
    assert_eq!(
        table.schema().types(),
        &[TypeTag::Str, TypeTag::Int, TypeTag::Str]
    );
    let lengths: Vec<usize> = table.rows().iter().map(|row| row.len()).collect();
    assert_eq!(lengths, vec![3, 3, 2, 3, 3]);
    assert_eq!(table.rows()[3].get(2).map(|f| f.tag()), Some(TypeTag::Int));
    assert_eq!(table.rows()[4].get(1).map(|f| f.tag()), Some(TypeTag::Float));
}

#[test]
fn crlf_input_and_additional_delimiter() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(&dir, "tilde.txt", "id~score~flag\r\n1~2.5~true\r\n2~3.0~false\r\n");
    let config = DelimiterConfig::new().with_additional(vec!["~".to_string()]);
    let table = read_table(&path, &config).expect("read table");

    assert_eq!(table.delimiter(), "~");
    assert_eq!(table.rows()[1].values().collect::<Vec<_>>(), vec!["2", "3.0", "false"]);
    assert_eq!(
        table.schema().types(),
        &[TypeTag::Int, TypeTag::Float, TypeTag::Bool]
    );
}

#[test]
fn explicit_delimiter_wins_over_detection() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(&dir, "mixed.csv", "a,b|c\n1,2|3\n");
    let config = DelimiterConfig::new().with_override(Some("|".to_string()));
    let table = read_table(&path, &config).expect("read table");
    assert_eq!(table.header(), vec!["a,b", "c"]);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_table(&dir.path().join("nope.csv"), &DelimiterConfig::new()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn blank_file_is_empty_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = temp_file(&dir, "blank.csv", "\n\n");
    let err = read_table(&path, &DelimiterConfig::new()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyInput { .. }));
}
