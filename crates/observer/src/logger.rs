//! Process-wide structured logger
//!
//! Appends bracketed records to a per-day file under the logs directory
//! and mirrors each record to the diagnostic stream through `tracing` at
//! the matching severity. Exactly one logger exists per process; see
//! [`Logger::init`] and [`Logger::global`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use autostore_common::{Error, Result};
use chrono::Utc;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde_json::Value;

use crate::record::{format_line, now_iso, Level, Payload};

/// Environment variable enabling `debug` records. Any value other than
/// the literal `true` leaves them disabled. Read once at construction;
/// later changes have no effect.
pub const DEBUG_ENV: &str = "AUTOSTORE_DEBUG";

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory the day files live in
    pub dir: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
        }
    }
}

/// Shared diagnostic sink for the whole test process.
///
/// Every record is a single appended line, so a crash mid-run leaves a
/// valid prefix of complete records.
pub struct Logger {
    path: PathBuf,
    stream: Mutex<Option<File>>,
    debug_enabled: bool,
}

impl Logger {
    /// Open a logger writing to `<dir>/test-<YYYY-MM-DD>.log`.
    ///
    /// The file name embeds the calendar date at construction and is
    /// never re-evaluated: a run that spans midnight keeps writing to
    /// the file it opened at start. Known limitation.
    ///
    /// Directory creation or open failures are fatal; there is no
    /// fallback sink.
    pub fn create(config: LoggerConfig) -> Result<Logger> {
        std::fs::create_dir_all(&config.dir)?;
        let today = Utc::now().format("%Y-%m-%d");
        let path = config.dir.join(format!("test-{today}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let debug_enabled = std::env::var(DEBUG_ENV).map(|v| v == "true").unwrap_or(false);
        Ok(Logger {
            path,
            stream: Mutex::new(Some(file)),
            debug_enabled,
        })
    }

    /// Eagerly initialize the process-wide logger, surfacing filesystem
    /// failures at the composition root. Idempotent: later calls (and
    /// [`Logger::global`]) return the same instance.
    pub fn init(config: LoggerConfig) -> Result<&'static Logger> {
        GLOBAL.get_or_try_init(|| Logger::create(config))
    }

    /// The process-wide logger, constructed with defaults on first use
    pub fn global() -> Result<&'static Logger> {
        Self::init(LoggerConfig::default())
    }

    /// Path of the day file this logger appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: &str, data: Option<Value>) -> Result<()> {
        self.log(Level::Info, message, data.map(Payload::Data))
    }

    pub fn warn(&self, message: &str, data: Option<Value>) -> Result<()> {
        self.log(Level::Warn, message, data.map(Payload::Data))
    }

    /// Errors usually attach [`Payload::from_error`]; arbitrary data
    /// passes through verbatim.
    pub fn error(&self, message: &str, payload: Option<Payload>) -> Result<()> {
        self.log(Level::Error, message, payload)
    }

    /// No-op - file and console both - unless [`DEBUG_ENV`] was `true`
    /// at construction.
    pub fn debug(&self, message: &str, data: Option<Value>) -> Result<()> {
        if !self.debug_enabled {
            return Ok(());
        }
        self.log(Level::Debug, message, data.map(Payload::Data))
    }

    /// Flush and end the stream, once, at process shutdown.
    ///
    /// Precondition for callers: no log calls after `close`. Not
    /// enforced beyond the call returning [`Error::StreamClosed`].
    pub fn close(&self) -> Result<()> {
        if let Some(mut file) = self.stream.lock().take() {
            file.flush()?;
        }
        Ok(())
    }

    fn log(&self, level: Level, message: &str, payload: Option<Payload>) -> Result<()> {
        let mut guard = self.stream.lock();
        let file = guard.as_mut().ok_or(Error::StreamClosed)?;
        // Timestamp taken under the lock so line order matches timestamp
        // order within the stream.
        let line = format_line(&now_iso(), level, message, payload.as_ref())?;
        file.write_all(format!("{line}\n").as_bytes())?;
        match level {
            Level::Info => tracing::info!(target: "autostore", "{line}"),
            Level::Warn => tracing::warn!(target: "autostore", "{line}"),
            Level::Error => tracing::error!(target: "autostore", "{line}"),
            Level::Debug => tracing::debug!(target: "autostore", "{line}"),
        }
        Ok(())
    }
}
