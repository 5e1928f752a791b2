//! Test-scoped logging bracket

use autostore_common::{SourceLocation, TestCase, TestStatus};
use autostore_observer::{Logger, LoggerConfig, TestLogger};
use serde_json::json;
use tempfile::TempDir;

fn sample_test() -> TestCase {
    TestCase {
        title: "should register a new user".into(),
        location: SourceLocation {
            file: "tests/registration.rs".into(),
            line: 14,
            column: 1,
        },
        project: "chromium".into(),
    }
}

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
fn test_bracket_records_wrap_the_body() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    {
        let mut scoped = TestLogger::begin(&logger, &sample_test()).unwrap();
        // The guard derefs to the shared logger for the body's own records.
        scoped
            .info("Generated registration data", Some(json!({"email": "a@b.c"})))
            .unwrap();
        scoped.record_outcome(TestStatus::Passed, None);
    }

    let lines = lines_of(&logger);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("INFO: Starting test: should register a new user"));
    assert!(lines[0].contains("\"testFile\":\"tests/registration.rs\""));
    assert!(lines[0].contains("\"project\":\"chromium\""));
    assert!(lines[1].contains("Generated registration data"));
    assert!(lines[2].contains("INFO: Finished test: should register a new user"));
    assert!(lines[2].contains("\"status\":\"passed\""));
    assert!(lines[2].contains("\"duration\":"));
}

#[test]
fn test_recorded_failure_lands_in_end_record() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    {
        let mut scoped = TestLogger::begin(&logger, &sample_test()).unwrap();
        scoped.record_outcome(
            TestStatus::Failed,
            Some("Failed to verify authentication state".into()),
        );
    }

    let lines = lines_of(&logger);
    let end = lines.last().unwrap();
    assert!(end.contains("\"status\":\"failed\""));
    assert!(end.contains("\"error\":\"Failed to verify authentication state\""));
}

#[test]
fn test_end_record_survives_a_panicking_body() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _scoped = TestLogger::begin(&logger, &sample_test()).unwrap();
        panic!("assertion blew up mid-test");
    }));
    assert!(result.is_err());

    let lines = lines_of(&logger);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Finished test: should register a new user"));
    assert!(lines[1].contains("\"status\":\"failed\""));
}

#[test]
fn test_passed_outcome_omits_error_field() {
    let tmp = TempDir::new().unwrap();
    let logger = logger_in(&tmp);

    {
        let mut scoped = TestLogger::begin(&logger, &sample_test()).unwrap();
        scoped.record_outcome(TestStatus::Passed, None);
    }

    assert!(!lines_of(&logger).last().unwrap().contains("\"error\""));
}
