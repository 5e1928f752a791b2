//! Scenario harness
//!
//! Stands in for the third-party runner at the reporter callback
//! boundary: executes scenarios on parallel worker tasks, funnels their
//! lifecycle events through a single dispatch loop that owns the
//! reporters (each reporter keeps a single-writer stream), and brackets
//! every test body with the logging fixture.

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use autostore_common::{
    Browser, Error, ErrorDetail, Reporter, Result, RunConfig, RunOutcome, RunStatus,
    SourceLocation, StepInfo, Suite, TestCase, TestOutcome, TestStatus,
};
use autostore_observer::{Logger, LoggerConfig, TestLogger};
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A single suite scenario: runner-visible metadata plus the async body
/// executed against a per-test [`Session`].
pub struct Scenario {
    pub test: TestCase,
    body: Box<dyn for<'a> Fn(&'a Session) -> BoxFuture<'a, Result<()>> + Send + Sync>,
}

impl Scenario {
    pub fn new<F>(title: &str, file: &str, line: u32, body: F) -> Self
    where
        F: for<'a> Fn(&'a Session) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        Scenario {
            test: TestCase {
                title: title.into(),
                location: SourceLocation {
                    file: file.into(),
                    line,
                    column: 1,
                },
                project: "chromium".into(),
            },
            body: Box::new(body),
        }
    }
}

enum WorkerEvent {
    TestBegin(TestCase),
    StepBegin(TestCase, StepInfo),
    StepEnd(TestCase, StepInfo),
    TestEnd(TestCase, TestOutcome),
}

/// Per-test scope handed to a scenario body: the shared logger, the
/// browser handle, and the step bracket.
pub struct Session {
    logger: &'static Logger,
    browser: Arc<dyn Browser>,
    base_url: String,
    test: TestCase,
    events: mpsc::UnboundedSender<WorkerEvent>,
}

impl Session {
    /// The process-wide logger, scoped to this test by the fixture
    pub fn logger(&self) -> &'static Logger {
        self.logger
    }

    pub fn browser(&self) -> &dyn Browser {
        self.browser.as_ref()
    }

    /// Resolve a path against the storefront base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Run a future as a named step, bracketed by step lifecycle events
    /// carrying the measured duration.
    pub async fn step<T, F>(&self, title: &str, category: &str, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        let step = StepInfo {
            title: title.into(),
            category: category.into(),
            duration_ms: 0,
        };
        let _ = self
            .events
            .send(WorkerEvent::StepBegin(self.test.clone(), step.clone()));
        let start = Instant::now();
        let out = fut.await;
        let _ = self.events.send(WorkerEvent::StepEnd(
            self.test.clone(),
            StepInfo {
                duration_ms: start.elapsed().as_millis() as u64,
                ..step
            },
        ));
        out
    }
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Configuration for the scenario harness
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of parallel worker tasks
    pub workers: usize,

    /// Per-test timeout; an expired test reports `timedOut`
    pub test_timeout: Duration,

    /// Storefront base URL relative navigations resolve against
    pub base_url: String,

    /// Directory for the day log and the run log
    pub logs_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            test_timeout: Duration::from_secs(30),
            base_url: "https://automationteststore.com".to_string(),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

/// Drives scenarios through the runner lifecycle
pub struct Harness {
    config: HarnessConfig,
    reporters: Vec<Box<dyn Reporter>>,
}

impl Harness {
    /// Create a harness, eagerly initializing the process-wide logger so
    /// filesystem failures abort before any test executes.
    pub fn new(config: HarnessConfig) -> Result<Self> {
        Logger::init(LoggerConfig {
            dir: config.logs_dir.clone(),
        })?;
        Ok(Harness {
            config,
            reporters: Vec::new(),
        })
    }

    pub fn add_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    /// Run every scenario and return the aggregate summary.
    ///
    /// `on_begin` fires before any test event and `on_run_end` after all
    /// of them, exactly once each; a reporting failure is fatal to the
    /// run.
    pub async fn run(
        &mut self,
        scenarios: Vec<Scenario>,
        browser: Arc<dyn Browser>,
    ) -> Result<RunSummary> {
        let start = Instant::now();
        let logger = Logger::global()?;

        let suite = Suite {
            tests: scenarios.iter().map(|s| s.test.clone()).collect(),
        };
        let config = RunConfig {
            workers: self.config.workers,
        };
        for reporter in &mut self.reporters {
            reporter.on_begin(&config, &suite)?;
        }
        info!(
            "Running {} test(s) on {} worker(s)...",
            suite.all_tests().len(),
            config.workers
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let queue = Arc::new(Mutex::new(scenarios.into_iter().collect::<VecDeque<_>>()));

        let mut handles = Vec::new();
        for _ in 0..self.config.workers.max(1) {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let browser = Arc::clone(&browser);
            let base_url = self.config.base_url.clone();
            let timeout = self.config.test_timeout;
            handles.push(tokio::spawn(async move {
                loop {
                    let scenario = { queue.lock().pop_front() };
                    let Some(scenario) = scenario else { break };
                    run_one(logger, scenario, &browser, &base_url, timeout, &tx).await;
                }
            }));
        }
        drop(tx);

        // Single consumer: reporter callbacks fire in event arrival
        // order, so each stream stays single-writer.
        let mut total = 0usize;
        let mut passed = 0usize;
        let mut failed = 0usize;
        while let Some(event) = rx.recv().await {
            match event {
                WorkerEvent::TestBegin(test) => {
                    for reporter in &mut self.reporters {
                        reporter.on_test_begin(&test)?;
                    }
                }
                WorkerEvent::StepBegin(test, step) => {
                    for reporter in &mut self.reporters {
                        reporter.on_step_begin(&test, &step)?;
                    }
                }
                WorkerEvent::StepEnd(test, step) => {
                    for reporter in &mut self.reporters {
                        reporter.on_step_end(&test, &step)?;
                    }
                }
                WorkerEvent::TestEnd(test, outcome) => {
                    total += 1;
                    if outcome.status == TestStatus::Passed {
                        passed += 1;
                        info!("✓ {} ({} ms)", test.title, outcome.duration_ms);
                    } else {
                        failed += 1;
                        error!(
                            "✗ {} - {}",
                            test.title,
                            outcome
                                .error
                                .as_ref()
                                .map(|e| e.message.as_str())
                                .unwrap_or("unknown error")
                        );
                    }
                    for reporter in &mut self.reporters {
                        reporter.on_test_end(&test, &outcome)?;
                    }
                }
            }
        }

        for handle in handles {
            handle
                .await
                .map_err(|e| Error::Setup(format!("worker task failed: {e}")))?;
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let outcome = RunOutcome {
            status: if failed == 0 {
                RunStatus::Passed
            } else {
                RunStatus::Failed
            },
            duration_ms,
        };
        for reporter in &mut self.reporters {
            reporter.on_run_end(&outcome)?;
        }

        info!("Test results: {passed} passed, {failed} failed ({duration_ms} ms)");
        Ok(RunSummary {
            total,
            passed,
            failed,
            duration_ms,
        })
    }
}

/// Execute one scenario: emit the test bracket, hold the logging fixture
/// open for the body's duration, and map error, panic, and timeout onto
/// a normal end-of-test event.
async fn run_one(
    logger: &'static Logger,
    scenario: Scenario,
    browser: &Arc<dyn Browser>,
    base_url: &str,
    timeout: Duration,
    events: &mpsc::UnboundedSender<WorkerEvent>,
) {
    let test = scenario.test.clone();
    let _ = events.send(WorkerEvent::TestBegin(test.clone()));

    let session = Session {
        logger,
        browser: Arc::clone(browser),
        base_url: base_url.to_string(),
        test: test.clone(),
        events: events.clone(),
    };

    let start = Instant::now();
    let mut scoped = match TestLogger::begin(logger, &test) {
        Ok(scoped) => scoped,
        Err(e) => {
            let _ = events.send(WorkerEvent::TestEnd(
                test,
                TestOutcome {
                    status: TestStatus::Failed,
                    duration_ms: 0,
                    error: Some(ErrorDetail {
                        message: e.to_string(),
                        stack: None,
                    }),
                    retry: 0,
                },
            ));
            return;
        }
    };

    let body = (scenario.body)(&session);
    let result = tokio::time::timeout(timeout, AssertUnwindSafe(body).catch_unwind()).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let (status, error) = match result {
        Ok(Ok(Ok(()))) => (TestStatus::Passed, None),
        Ok(Ok(Err(e))) => (TestStatus::Failed, Some(error_detail(&e))),
        Ok(Err(panic)) => (
            TestStatus::Failed,
            Some(ErrorDetail {
                message: panic_message(panic),
                stack: None,
            }),
        ),
        Err(_) => (
            TestStatus::TimedOut,
            Some(ErrorDetail {
                message: format!("Test timed out after {}ms", timeout.as_millis()),
                stack: None,
            }),
        ),
    };

    scoped.record_outcome(status, error.as_ref().map(|e| e.message.clone()));
    drop(scoped);

    let _ = events.send(WorkerEvent::TestEnd(
        test,
        TestOutcome {
            status,
            duration_ms,
            error,
            retry: 0,
        },
    ));
}

fn error_detail(err: &Error) -> ErrorDetail {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    ErrorDetail {
        message: err.to_string(),
        stack: (!causes.is_empty()).then(|| causes.join("\ncaused by: ")),
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "test body panicked".to_string()
    }
}
