//! Error types for the autostore e2e suite

use thiserror::Error;

/// Result type alias using the suite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Suite error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The logger's day file was closed with `close()` and a log call
    /// arrived afterwards.
    #[error("Log stream is closed")]
    StreamClosed,

    /// The run reporter received an event after `on_run_end`. The
    /// `Open -> Closed` transition is terminal.
    #[error("Reporter is closed: run already finished")]
    ReporterClosed,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Failed to verify authentication state")]
    AuthVerification,

    #[error("Test timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("Setup error: {0}")]
    Setup(String),
}
