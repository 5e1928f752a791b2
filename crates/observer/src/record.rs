//! Log record primitives

use autostore_common::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Debug,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload attached to a record.
///
/// A closed variant: either arbitrary data passed through verbatim, or a
/// recognized error value reduced to its message and cause chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    Data(Value),
}

impl Payload {
    /// Reduce an error value to `{message, stack}`. Rust errors carry a
    /// cause chain rather than a captured stack, so `stack` is the
    /// rendered chain of `source()` causes, absent when there are none.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let message = err.to_string();
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        let stack = if causes.is_empty() {
            None
        } else {
            Some(causes.join("\ncaused by: "))
        };
        Payload::Error { message, stack }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Data(value)
    }
}

/// Current instant in ISO-8601 with millisecond precision
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render one day-file line: `[<timestamp>] <LEVEL>: <message> | <json>`
/// (the ` | <json>` suffix only when a payload is present).
pub(crate) fn format_line(
    timestamp: &str,
    level: Level,
    message: &str,
    payload: Option<&Payload>,
) -> Result<String> {
    Ok(match payload {
        Some(payload) => format!(
            "[{timestamp}] {level}: {message} | {}",
            serde_json::to_string(payload)?
        ),
        None => format!("[{timestamp}] {level}: {message}"),
    })
}
