//! Utilities for human readable output on stdout, with a rewritable progress line.

use std::io::{self, IsTerminal, Write};
use std::fmt::Display;
use std::env;


/// An abstraction for leveled human readable output on stdout, supporting a
/// progress line that is rewritten in place by the next message when the
/// terminal supports it.
#[derive(Debug)]
pub struct Output {
    /// Minimum level for a line to be written.
    log_level: LogLevel,
    /// Are cursor escape code supported on stdout.
    escape_cursor_cap: bool,
    /// Are color escape code supported on stdout.
    escape_color_cap: bool,
    /// True when the last written line is a progress line, not yet terminated.
    pending: bool,
}

impl Output {

    pub fn new(log_level: LogLevel) -> Self {

        let term_dumb = !io::stdout().is_terminal() || (cfg!(unix) && env::var_os("TERM").map(|term| term == "dumb").unwrap_or_default());
        let no_color = env::var_os("NO_COLOR").map(|s| !s.is_empty()).unwrap_or_default();

        Self {
            log_level,
            escape_cursor_cap: !term_dumb,
            escape_color_cap: !term_dumb && !no_color,
            pending: false,
        }

    }

    /// Write a log line with an associated level, a progress line is not
    /// terminated and will be overwritten by the next line.
    pub fn line(&mut self, level: LogLevel, message: impl Display) {

        if level < self.log_level {
            return;
        }

        let (name, color) = match level {
            LogLevel::Info => ("INFO", "\x1b[34m"),
            LogLevel::Progress => ("..", ""),
            LogLevel::Success => ("OK", "\x1b[92m"),
            LogLevel::Warning => ("WARN", "\x1b[33m"),
            LogLevel::Error => ("FAILED", "\x1b[31m"),
        };

        let mut lock = io::stdout().lock();

        if self.pending {
            if self.escape_cursor_cap {
                let _ = lock.write_all(b"\r\x1b[K");
            } else {
                let _ = lock.write_all(b"\n");
            }
        }

        if !self.escape_color_cap || color.is_empty() {
            let _ = write!(lock, "[{name:^6}] {message}");
        } else {
            let _ = write!(lock, "[{color}{name:^6}\x1b[0m] {message}");
        }

        if level == LogLevel::Progress {
            self.pending = true;
        } else {
            let _ = lock.write_all(b"\n");
            self.pending = false;
        }

        let _ = lock.flush();

    }

    #[inline]
    pub fn info(&mut self, message: impl Display) {
        self.line(LogLevel::Info, message)
    }

    #[inline]
    pub fn progress(&mut self, message: impl Display) {
        self.line(LogLevel::Progress, message)
    }

    #[inline]
    pub fn success(&mut self, message: impl Display) {
        self.line(LogLevel::Success, message)
    }

    #[inline]
    pub fn warning(&mut self, message: impl Display) {
        self.line(LogLevel::Warning, message)
    }

    #[inline]
    pub fn error(&mut self, message: impl Display) {
        self.line(LogLevel::Error, message)
    }

    /// Write a raw report field, always shown regardless of the log level.
    pub fn field(&mut self, name: &str, value: impl Display) {

        let mut lock = io::stdout().lock();

        if self.pending {
            if self.escape_cursor_cap {
                let _ = lock.write_all(b"\r\x1b[K");
            } else {
                let _ = lock.write_all(b"\n");
            }
            self.pending = false;
        }

        let _ = writeln!(lock, "  {name}: {value}");
        let _ = lock.flush();

    }

}

/// Level for a human-readable log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// This log is something indicative, discarded when not in verbose mode.
    Info,
    /// This log indicate something is in progress and the definitive state is unknown.
    Progress,
    /// This log indicate a success.
    Success,
    /// This log is a warning.
    Warning,
    /// This log is an error.
    Error,
}
