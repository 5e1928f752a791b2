//! Runner lifecycle protocol
//!
//! The data the test runner hands to reporter callbacks, and the
//! `Reporter` interface itself. The runner guarantees `on_begin` fires
//! before any test event and `on_run_end` fires after all of them,
//! exactly once each per run. Test and step events for concurrently
//! running tests may interleave.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runner configuration visible to reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of parallel workers executing tests
    pub workers: usize,
}

/// The set of discovered tests for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    pub tests: Vec<TestCase>,
}

impl Suite {
    /// All tests discovered for the run, in declaration order
    pub fn all_tests(&self) -> &[TestCase] {
        &self.tests
    }
}

/// Source position a test was declared at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// A single test as the runner sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub title: String,
    pub location: SourceLocation,
    /// Project (browser/profile) the test runs under
    pub project: String,
}

/// Final status of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    TimedOut,
    Skipped,
    Interrupted,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::TimedOut => "timedOut",
            TestStatus::Skipped => "skipped",
            TestStatus::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

/// Failure details attached to a test outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Result of a finished test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    /// Retry index; 0 for the first attempt
    pub retry: u32,
}

/// A named step inside a running test. `duration_ms` is meaningful only
/// once the step has finished; it is 0 at step start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
    pub title: String,
    pub category: String,
    pub duration_ms: u64,
}

/// Final status of a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Passed,
    Failed,
    TimedOut,
    Interrupted,
}

/// Result of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub duration_ms: u64,
}

/// Runner lifecycle callbacks.
///
/// One method per lifecycle event; implementors produce exactly one
/// durable record per invocation. Errors propagate back to the runner,
/// which treats a reporting failure as fatal rather than silently losing
/// audit data.
pub trait Reporter: Send {
    fn on_begin(&mut self, config: &RunConfig, suite: &Suite) -> Result<()>;

    fn on_test_begin(&mut self, test: &TestCase) -> Result<()>;

    fn on_test_end(&mut self, test: &TestCase, outcome: &TestOutcome) -> Result<()>;

    fn on_step_begin(&mut self, test: &TestCase, step: &StepInfo) -> Result<()>;

    fn on_step_end(&mut self, test: &TestCase, step: &StepInfo) -> Result<()>;

    /// Terminal event. No callback may be invoked on this reporter
    /// afterwards.
    fn on_run_end(&mut self, outcome: &RunOutcome) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&TestStatus::TimedOut).unwrap(),
            "\"timedOut\""
        );
        assert_eq!(
            serde_json::to_string(&TestStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_outcome_omits_absent_error() {
        let outcome = TestOutcome {
            status: TestStatus::Passed,
            duration_ms: 12,
            error: None,
            retry: 0,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["status"], "passed");
    }

    #[test]
    fn test_suite_lists_tests_in_order() {
        let suite = Suite {
            tests: vec![
                TestCase {
                    title: "first".into(),
                    location: SourceLocation {
                        file: "tests/a.rs".into(),
                        line: 1,
                        column: 1,
                    },
                    project: "chromium".into(),
                },
                TestCase {
                    title: "second".into(),
                    location: SourceLocation {
                        file: "tests/b.rs".into(),
                        line: 2,
                        column: 1,
                    },
                    project: "chromium".into(),
                },
            ],
        };
        let titles: Vec<&str> = suite.all_tests().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }
}
