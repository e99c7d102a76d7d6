//! Append-only execution log
//!
//! Every tool execution is recorded as one line in `execution.log`:
//! `[timestamp] [EVENT TYPE] message`. Writes are best-effort — failures are
//! logged and never propagate to callers.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Event types recorded in the execution log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    /// Client session started
    SessionStart,
    /// Client session ended
    SessionEnd,
    /// The model requested a function call
    IntentDetected,
    /// A tool is about to run
    Executing,
    /// Tool execution succeeded
    Success,
    /// Tool execution failed
    Error,
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SessionStart => "SESSION START",
            Self::SessionEnd => "SESSION END",
            Self::IntentDetected => "INTENT DETECTED",
            Self::Executing => "EXECUTING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Append-only execution logger
pub struct ExecutionLog {
    path: PathBuf,
}

impl ExecutionLog {
    /// Create a logger writing to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event line (best-effort)
    pub fn append(&self, event: AuditEvent, message: &str) {
        let line = format_line(Utc::now(), event, message);
        if let Err(e) = self.write_line(&line) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to append to execution log"
            );
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

/// Format one log line: `[timestamp] [EVENT TYPE] message`
fn format_line(timestamp: DateTime<Utc>, event: AuditEvent, message: &str) -> String {
    format!(
        "[{}] [{event}] {message}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Parse a log line into (timestamp, event type, message)
///
/// Returns `None` for lines that do not match the format.
#[must_use]
pub fn parse_line(line: &str) -> Option<(String, String, String)> {
    let rest = line.strip_prefix('[')?;
    let (timestamp, rest) = rest.split_once("] [")?;
    let (event, message) = rest.split_once("] ")?;
    Some((
        timestamp.to_string(),
        event.to_string(),
        message.to_string(),
    ))
}
