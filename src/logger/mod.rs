//
//  cloudflare-client
//  logger/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Leveled Logger
//!
//! The client reports request/response dumps and retry attempts through a small
//! leveled logger rather than writing to the terminal directly.
//!
//! ## Levels
//!
//! | Level | Sink | Emitted when configured level is at least |
//! |-------|------|-------------------------------------------|
//! | `Error` | stderr | `Error` |
//! | `Warn` | stderr | `Warn` |
//! | `Info` | stdout | `Info` |
//! | `Debug` | stdout | `Debug` |
//!
//! `Null` silences everything. The retrying transport is handed a silent logger
//! unless the client is built with debug enabled.
//!
//! Applications that already run a `tracing` subscriber can plug in
//! [`TracingLogger`] instead.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Minimum severity a logger emits.
///
/// Ordered so that `Null < Error < Warn < Info < Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Emit nothing.
    Null,
    /// Errors only.
    #[default]
    Error,
    /// Errors and warnings.
    Warn,
    /// Everything but debug output.
    Info,
    /// Everything.
    Debug,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// Sink for the client's diagnostic output.
///
/// Implementations must be shareable across tasks; the client holds one behind
/// an `Arc` for its whole lifetime.
pub trait Logger: Send + Sync {
    /// Logs at `Error` level.
    fn error(&self, args: fmt::Arguments<'_>);
    /// Logs at `Warn` level.
    fn warn(&self, args: fmt::Arguments<'_>);
    /// Logs at `Info` level.
    fn info(&self, args: fmt::Arguments<'_>);
    /// Logs at `Debug` level.
    fn debug(&self, args: fmt::Arguments<'_>);
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Logger gated by a minimum [`LogLevel`], writing info/debug to one sink and
/// warn/error to another.
pub struct LeveledLogger {
    level: LogLevel,
    stdout: Sink,
    stderr: Sink,
}

impl LeveledLogger {
    /// Creates a logger writing to the process stdout and stderr.
    pub fn new(level: LogLevel) -> Self {
        Self::with_writers(level, io::stdout(), io::stderr())
    }

    /// Creates a logger with custom sinks.
    ///
    /// `out` receives info and debug lines, `err` receives warn and error lines.
    pub fn with_writers<O, E>(level: LogLevel, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            level,
            stdout: Mutex::new(Box::new(out)),
            stderr: Mutex::new(Box::new(err)),
        }
    }

    /// Creates a logger that emits nothing.
    pub fn silent() -> Self {
        Self::with_writers(LogLevel::Null, io::sink(), io::sink())
    }

    /// Returns the configured minimum level.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.level == LogLevel::Null || level > self.level {
            return;
        }

        let sink = match level {
            LogLevel::Error | LogLevel::Warn => &self.stderr,
            _ => &self.stdout,
        };

        let timestamp = chrono::Utc::now().format("%Y/%m/%d %H:%M:%S");
        // A poisoned sink only means another writer panicked mid-line.
        let mut writer = match sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "{} [{}] {}", timestamp, level.label(), args);
    }
}

impl fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl Logger for LeveledLogger {
    fn error(&self, args: fmt::Arguments<'_>) {
        self.write(LogLevel::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.write(LogLevel::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.write(LogLevel::Info, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.write(LogLevel::Debug, args);
    }
}

/// Logger forwarding to the `tracing` macros, gated by a minimum level.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    level: LogLevel,
}

impl TracingLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.level != LogLevel::Null && level <= self.level
    }
}

impl Logger for TracingLogger {
    fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Error) {
            tracing::error!("{}", args);
        }
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Warn) {
            tracing::warn!("{}", args);
        }
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Info) {
            tracing::info!("{}", args);
        }
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Debug) {
            tracing::debug!("{}", args);
        }
    }
}

/// Returns a shared logger that drops everything.
pub fn silent_logger() -> Arc<dyn Logger> {
    Arc::new(LeveledLogger::silent())
}

/// Returns the default logger for a client: `Debug` when debug output is
/// requested, `Error` otherwise.
pub fn default_logger(debug: bool) -> Arc<dyn Logger> {
    let level = if debug { LogLevel::Debug } else { LogLevel::Error };
    Arc::new(LeveledLogger::new(level))
}

/// In-memory sink, handy for capturing logger output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(level: LogLevel) -> (LeveledLogger, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        let logger = LeveledLogger::with_writers(level, out.clone(), err.clone());
        (logger, out, err)
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Null < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::default(), LogLevel::Error);
    }

    #[test]
    fn test_error_level_gates_lower_severities() {
        let (logger, out, err) = capture(LogLevel::Error);
        logger.error(format_args!("boom {}", 1));
        logger.warn(format_args!("careful"));
        logger.info(format_args!("hello"));
        logger.debug(format_args!("details"));

        assert!(err.contents().contains("[ERROR] boom 1"));
        assert!(!err.contents().contains("careful"));
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_debug_level_routes_to_both_sinks() {
        let (logger, out, err) = capture(LogLevel::Debug);
        logger.warn(format_args!("careful"));
        logger.info(format_args!("hello"));
        logger.debug(format_args!("details"));

        assert!(err.contents().contains("[WARN] careful"));
        assert!(out.contents().contains("[INFO] hello"));
        assert!(out.contents().contains("[DEBUG] details"));
    }

    #[test]
    fn test_null_level_is_silent() {
        let (logger, out, err) = capture(LogLevel::Null);
        logger.error(format_args!("boom"));
        logger.debug(format_args!("details"));
        assert!(out.contents().is_empty());
        assert!(err.contents().is_empty());
    }
}
