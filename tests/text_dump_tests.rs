use std::fs;

use sample_logger::{LoggerError, SampleLogger, DEFAULT_TEXT_DELIMITER};
use tempfile::tempdir;

fn titles(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn test_dump_full_log_with_default_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("full.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(2, 3).unwrap();
    for value in 1..=6 {
        log.log(value as f64).unwrap();
    }

    log.dump_to_text_file(&path, DEFAULT_TEXT_DELIMITER).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1, 2, 3\n4, 5, 6\n");
}

#[test]
fn test_dump_includes_the_partial_current_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(4, 3).unwrap();
    for value in 1..=4 {
        log.log(value as f64).unwrap();
    }

    // The cursor sits mid-row in row 1; that row is dumped anyway, its
    // unwritten cells rendered as defaults.
    log.dump_to_text_file(&path, DEFAULT_TEXT_DELIMITER).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1, 2, 3\n4, 0, 0\n");
}

#[test]
fn test_dump_with_title_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("titled.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(1, 2).unwrap();
    log.log(0.5).unwrap().log(-0.5).unwrap();

    log.dump_to_text_file_with_titles(&path, &titles(&["a", "b"]), DEFAULT_TEXT_DELIMITER)
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a, b\n0.5, -0.5\n");
}

#[test]
fn test_dump_rejects_title_count_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mismatch.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(1, 3).unwrap();

    let err = log
        .dump_to_text_file_with_titles(&path, &titles(&["only", "two"]), DEFAULT_TEXT_DELIMITER)
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidArgument(_)));
    assert!(!path.exists(), "no file may be created on a rejected dump");
}

#[test]
fn test_dump_rejects_uninitialized_logger() {
    let dir = tempdir().unwrap();
    let log = SampleLogger::<f64>::new();

    let err = log
        .dump_to_text_file(dir.path().join("none.csv"), DEFAULT_TEXT_DELIMITER)
        .unwrap_err();
    assert!(matches!(err, LoggerError::NotInitialized));

    let mut zero_rows = SampleLogger::<f64>::new();
    zero_rows.initialize_by_row_column(0, 3).unwrap();
    assert!(matches!(
        zero_rows.dump_to_text_file(dir.path().join("zero.csv"), DEFAULT_TEXT_DELIMITER),
        Err(LoggerError::NotInitialized)
    ));
}

#[test]
fn test_dump_fails_on_unwritable_path() {
    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(1, 1).unwrap();
    log.log(1.0).unwrap();

    let err = log
        .dump_to_text_file("/nonexistent-dir/out.csv", DEFAULT_TEXT_DELIMITER)
        .unwrap_err();
    assert!(matches!(err, LoggerError::Io(_)));
}

#[test]
fn test_matlab_dump_uses_spaces_and_no_titles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.dat");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(2, 3).unwrap();
    for value in [0.0, 12.0, 0.0, 1.5e-6, 11.25, 0.125] {
        log.log(value).unwrap();
    }

    log.dump_to_ascii_matlab_file(&path).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "0 12 0\n1.5e-6 11.25 0.125\n"
    );
}

#[test]
fn test_floats_render_at_fifteen_significant_digits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("precision.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(1, 3).unwrap();
    log.log(std::f64::consts::PI).unwrap();
    log.log(0.1).unwrap();
    log.log(2.0 / 3.0).unwrap();

    log.dump_to_text_file(&path, DEFAULT_TEXT_DELIMITER).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "3.14159265358979, 0.1, 0.666666666666667\n"
    );
}

#[test]
fn test_custom_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tabs.tsv");

    let mut log = SampleLogger::<i32>::new();
    log.initialize_by_row_column(2, 2).unwrap();
    log.log(1).unwrap().log(2).unwrap().log(3).unwrap().log(4).unwrap();

    log.dump_to_text_file(&path, "\t").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1\t2\n3\t4\n");
}

#[test]
fn test_sealed_log_dumps_a_trailing_default_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sealed.csv");

    let mut log = SampleLogger::<f64>::new();
    log.initialize_by_row_column(2, 2).unwrap();
    log.log(1.0).unwrap().log(2.0).unwrap();
    log.fill_current_row(0.0).unwrap();

    // Sealing moved the cursor into row 1; the inclusive-of-current-row
    // policy dumps that still-empty row as defaults.
    log.dump_to_text_file(&path, DEFAULT_TEXT_DELIMITER).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1, 2\n0, 0\n");
}
