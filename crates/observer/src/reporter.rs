//! Run lifecycle reporter
//!
//! Translates runner callbacks into a durable NDJSON audit log of the
//! run, one file per run, independent of the day logger. Record order in
//! the file is the runner's emission order; events from concurrently
//! running tests may interleave.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use autostore_common::{
    Error, Reporter, Result, RunConfig, RunOutcome, StepInfo, Suite, TestCase, TestOutcome,
};
use chrono::{SecondsFormat, Utc};

use crate::event::ReportEvent;

enum StreamState {
    Open(File),
    Closed,
}

/// Reporter writing `logs/test-run-<timestamp>.log`.
///
/// State machine: `Open` (from construction) accepts every event;
/// `on_run_end` writes the final record and moves to `Closed`, which is
/// terminal. Write failures are never caught here; the runner treats
/// them as a fatal reporting error.
pub struct RunReporter {
    path: PathBuf,
    stream: StreamState,
}

impl RunReporter {
    /// Open the run log under `dir`. Called once at runner startup,
    /// before any test executes; the filename embeds that instant with
    /// `:` and `.` made filesystem-safe.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        let stamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        let path = dir.as_ref().join(format!("test-run-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            stream: StreamState::Open(file),
        })
    }

    /// Path of this run's log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&mut self, event: &ReportEvent) -> Result<()> {
        let file = match &mut self.stream {
            StreamState::Open(file) => file,
            StreamState::Closed => return Err(Error::ReporterClosed),
        };
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        // One write per record so a crash cannot split a line.
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Reporter for RunReporter {
    fn on_begin(&mut self, config: &RunConfig, suite: &Suite) -> Result<()> {
        self.write_event(&ReportEvent::RunStarted {
            timestamp: Utc::now(),
            worker_count: config.workers,
            total_tests: suite.all_tests().len(),
        })
    }

    fn on_test_begin(&mut self, test: &TestCase) -> Result<()> {
        self.write_event(&ReportEvent::TestStarted {
            timestamp: Utc::now(),
            title: test.title.clone(),
            location: test.location.clone(),
        })
    }

    fn on_test_end(&mut self, test: &TestCase, outcome: &TestOutcome) -> Result<()> {
        self.write_event(&ReportEvent::TestFinished {
            timestamp: Utc::now(),
            title: test.title.clone(),
            status: outcome.status,
            duration_ms: outcome.duration_ms,
            error: outcome.error.as_ref().map(|e| e.message.clone()),
            retry_count: outcome.retry,
        })
    }

    fn on_step_begin(&mut self, _test: &TestCase, step: &StepInfo) -> Result<()> {
        self.write_event(&ReportEvent::StepStarted {
            timestamp: Utc::now(),
            title: step.title.clone(),
            category: step.category.clone(),
        })
    }

    fn on_step_end(&mut self, _test: &TestCase, step: &StepInfo) -> Result<()> {
        self.write_event(&ReportEvent::StepFinished {
            timestamp: Utc::now(),
            title: step.title.clone(),
            category: step.category.clone(),
            duration_ms: step.duration_ms,
        })
    }

    fn on_run_end(&mut self, outcome: &RunOutcome) -> Result<()> {
        self.write_event(&ReportEvent::RunFinished {
            timestamp: Utc::now(),
            status: outcome.status,
            duration_ms: outcome.duration_ms,
        })?;
        if let StreamState::Open(file) = &mut self.stream {
            file.flush()?;
        }
        self.stream = StreamState::Closed;
        Ok(())
    }
}
