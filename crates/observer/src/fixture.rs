//! Per-test logging fixture
//!
//! Brackets a single test with start/end audit records. Acquisition
//! writes the start record; release is the `Drop` impl, which runs on
//! every exit path - success, assertion failure, panic unwind, timeout -
//! so the end record is never lost to how the test body exited.

use std::ops::Deref;
use std::time::Instant;

use autostore_common::{Result, TestCase, TestStatus};
use serde_json::{Map, Value};

use crate::logger::Logger;

/// Scoped logger handed to a test body for the duration of one test.
///
/// Derefs to the shared [`Logger`], so the body logs through the same
/// day file as everything else in the process.
pub struct TestLogger<'a> {
    logger: &'a Logger,
    title: String,
    started: Instant,
    outcome: Option<(TestStatus, Option<String>)>,
}

impl<'a> TestLogger<'a> {
    /// Emit the start-of-test record and start the duration clock.
    pub fn begin(logger: &'a Logger, test: &TestCase) -> Result<TestLogger<'a>> {
        let mut data = Map::new();
        data.insert("testFile".into(), test.location.file.clone().into());
        data.insert("project".into(), test.project.clone().into());
        logger.info(
            &format!("Starting test: {}", test.title),
            Some(Value::Object(data)),
        )?;
        Ok(TestLogger {
            logger,
            title: test.title.clone(),
            started: Instant::now(),
            outcome: None,
        })
    }

    /// Record the final status before the guard is released. Without
    /// this, drop reports `failed` when unwinding and `passed` otherwise.
    pub fn record_outcome(&mut self, status: TestStatus, error: Option<String>) {
        self.outcome = Some((status, error));
    }
}

impl Deref for TestLogger<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl Drop for TestLogger<'_> {
    fn drop(&mut self) {
        let (status, error) = match self.outcome.take() {
            Some(outcome) => outcome,
            None if std::thread::panicking() => (TestStatus::Failed, None),
            None => (TestStatus::Passed, None),
        };
        let mut data = Map::new();
        data.insert(
            "duration".into(),
            (self.started.elapsed().as_millis() as u64).into(),
        );
        data.insert("status".into(), Value::String(status.to_string()));
        if let Some(message) = error {
            data.insert("error".into(), message.into());
        }
        // A destructor cannot propagate; a lost end record only degrades
        // the audit trail, it must not turn teardown into a second panic.
        if let Err(e) = self.logger.info(
            &format!("Finished test: {}", self.title),
            Some(Value::Object(data)),
        ) {
            tracing::warn!(target: "autostore", "end-of-test record not written: {e}");
        }
    }
}
