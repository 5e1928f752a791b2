//! Autostore Common Library
//!
//! Shared types, interfaces, and error handling for the autostore e2e suite.

pub mod browser;
pub mod error;
pub mod protocol;

// Re-export commonly used types
pub use browser::Browser;
pub use error::{Error, Result};
pub use protocol::{
    ErrorDetail, Reporter, RunConfig, RunOutcome, RunStatus, SourceLocation, StepInfo, Suite,
    TestCase, TestOutcome, TestStatus,
};

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
