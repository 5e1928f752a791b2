//! Autostore Test-Run Observability
//!
//! Durable, structured logging for a single test-run process:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    runner / test bodies                    │
//! ├────────────────────────────────────────────────────────────┤
//! │  TestLogger (per test)        RunReporter (per run)        │
//! │    start/end bracket            six lifecycle callbacks    │
//! │        │                              │                    │
//! │        v                              v                    │
//! │  Logger (per process)          NDJSON run log              │
//! │    logs/test-<date>.log          logs/test-run-<ts>.log    │
//! │    + console mirror                                        │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each component owns its stream exclusively; every write is a single
//! appended line, so a crash leaves a valid prefix of parseable records.

pub mod event;
pub mod fixture;
pub mod logger;
pub mod record;
pub mod reporter;

pub use event::ReportEvent;
pub use fixture::TestLogger;
pub use logger::{Logger, LoggerConfig, DEBUG_ENV};
pub use record::{Level, Payload};
pub use reporter::RunReporter;
