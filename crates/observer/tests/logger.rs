//! Day-file logger behavior

use autostore_common::Error;
use autostore_observer::{Logger, LoggerConfig, Payload, DEBUG_ENV};
use serde_json::json;
use tempfile::TempDir;

fn logger_in(tmp: &TempDir) -> Logger {
    Logger::create(LoggerConfig {
        dir: tmp.path().to_path_buf(),
    })
    .unwrap()
}

fn lines_of(logger: &Logger) -> Vec<String> {
    std::fs::read_to_string(logger.path())
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_each_call_appends_exactly_one_line() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    logger.info("first", None).unwrap();
    logger.warn("second", Some(json!({"n": 2}))).unwrap();
    logger.error("third", None).unwrap();

    let lines = lines_of(&logger);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("] INFO: first"));
    assert!(lines[1].contains("] WARN: second | {\"n\":2}"));
    assert!(lines[2].contains("] ERROR: third"));
}

#[test]
fn test_day_file_name_embeds_date() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    let name = logger.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("test-"));
    assert!(name.ends_with(".log"));
    // test-YYYY-MM-DD.log
    assert_eq!(name.len(), "test-2026-08-06.log".len());
}

#[test]
fn test_error_payload_from_error_value() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    let err = Error::StreamClosed;
    logger
        .error("operation failed", Some(Payload::from_error(&err)))
        .unwrap();

    let lines = lines_of(&logger);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("{\"message\":\"Log stream is closed\"}"));
}

#[test]
fn test_error_payload_passes_data_through() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    logger
        .error("bad response", Some(Payload::from(json!({"code": 500}))))
        .unwrap();

    assert!(lines_of(&logger)[0].ends_with("| {\"code\":500}"));
}

// One test owns the debug env var end to end; splitting it up would race
// under the parallel test runner.
#[test]
fn test_debug_flag_read_once_at_construction() {
    let tmp = TempDir::new().unwrap();

    // Flag absent: debug yields zero lines, file and console alike.
    std::env::remove_var(DEBUG_ENV);
    let silent = logger_in(&tmp);
    silent.debug("invisible", None).unwrap();
    assert!(lines_of(&silent).is_empty());

    // Any value other than the literal enabling string stays disabled.
    std::env::set_var(DEBUG_ENV, "1");
    let still_silent = logger_in(&tmp);
    still_silent.debug("nope", None).unwrap();
    assert!(lines_of(&still_silent).is_empty());

    // The literal enabling string, captured at construction time.
    std::env::set_var(DEBUG_ENV, "true");
    let verbose = logger_in(&tmp);
    verbose.debug("visible", Some(json!({"x": 1}))).unwrap();
    std::env::remove_var(DEBUG_ENV);

    let lines = lines_of(&verbose);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("] DEBUG: visible"));

    // The earlier loggers captured the flag at construction; they stay
    // silent even after it was flipped.
    silent.debug("still invisible", None).unwrap();
    assert_eq!(lines_of(&verbose).len(), 1);
}

#[test]
fn test_close_ends_the_stream() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    logger.info("before close", None).unwrap();
    logger.close().unwrap();

    assert!(matches!(
        logger.info("after close", None),
        Err(Error::StreamClosed)
    ));
    assert_eq!(lines_of(&logger).len(), 1);
}

#[test]
fn test_reopening_same_day_appends() {
    let tmp = TempDir::new().unwrap();

    let first = logger_in(&tmp);
    first.info("from first", None).unwrap();
    first.close().unwrap();

    let second = logger_in(&tmp);
    assert_eq!(first.path(), second.path());
    second.info("from second", None).unwrap();

    let lines = lines_of(&second);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("from first"));
    assert!(lines[1].contains("from second"));
}

#[test]
fn test_timestamps_non_decreasing_within_stream() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    for i in 0..20 {
        logger.info(&format!("record {i}"), None).unwrap();
    }

    // ISO-8601 UTC instants sort lexicographically.
    let stamps: Vec<String> = lines_of(&logger)
        .iter()
        .map(|l| l[1..l.find(']').unwrap()].to_string())
        .collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
}
