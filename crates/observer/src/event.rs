//! Report events
//!
//! The closed set of lifecycle events the run reporter persists, one
//! NDJSON line each. The `event` field carries the variant tag so every
//! written line round-trips through this enum.

use autostore_common::{RunStatus, SourceLocation, TestStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum ReportEvent {
    RunStarted {
        timestamp: DateTime<Utc>,
        worker_count: usize,
        total_tests: usize,
    },
    TestStarted {
        timestamp: DateTime<Utc>,
        title: String,
        location: SourceLocation,
    },
    TestFinished {
        timestamp: DateTime<Utc>,
        title: String,
        status: TestStatus,
        duration_ms: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        retry_count: u32,
    },
    StepStarted {
        timestamp: DateTime<Utc>,
        title: String,
        category: String,
    },
    StepFinished {
        timestamp: DateTime<Utc>,
        title: String,
        category: String,
        duration_ms: u64,
    },
    RunFinished {
        timestamp: DateTime<Utc>,
        status: RunStatus,
        duration_ms: u64,
    },
}
