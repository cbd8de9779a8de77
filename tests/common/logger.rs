//! Test logging for structured test output and debugging.
#![allow(dead_code)]
//!
//! Lines go to stderr, which the test harness captures unless a test fails
//! or `--nocapture` is passed.
//!
//! - `TEST_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! - `TEST_LOG_JSON` - "1" or "true" for one JSON object per line

use std::env;
use std::fmt::Display;
use std::time::Instant;

use super::log_capture::TestLogCapture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

fn min_level() -> LogLevel {
    env::var("TEST_LOG_LEVEL")
        .ok()
        .and_then(|s| LogLevel::parse(&s))
        .unwrap_or(LogLevel::Info)
}

fn json_mode() -> bool {
    env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Per-test logger with phase and duration tracking.
pub struct TestLogger {
    name: String,
    start: Instant,
    min_level: LogLevel,
    json: bool,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Self {
        let log = Self {
            name: test_name.to_string(),
            start: Instant::now(),
            min_level: min_level(),
            json: json_mode(),
        };
        log.info("start");
        log
    }

    /// Logger plus a tracing capture scoped to the current thread.
    pub fn with_capture(test_name: &str) -> (Self, TestLogCapture) {
        (Self::new(test_name), TestLogCapture::start())
    }

    pub fn phase(&self, phase: &str) {
        self.info(format!("phase: {phase}"));
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Display) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn http_request(&self, method: &str, url: &str) {
        self.debug(format!("HTTP {method} {url}"));
    }

    pub fn finish_ok(&self) {
        self.info(format!("ok ({} ms)", self.elapsed_ms()));
    }

    pub fn finish_err(&self, reason: &str) {
        self.emit(
            LogLevel::Error,
            format!("failed after {} ms: {reason}", self.elapsed_ms()),
        );
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    fn emit(&self, level: LogLevel, message: impl Display) {
        if level < self.min_level {
            return;
        }
        if self.json {
            let message = message.to_string().replace('\\', "\\\\").replace('"', "\\\"");
            eprintln!(
                r#"{{"test":"{}","level":"{}","elapsed_ms":{},"message":"{}"}}"#,
                self.name,
                level.as_str(),
                self.elapsed_ms(),
                message
            );
        } else {
            eprintln!(
                "[{:>5}] [{}] +{}ms {}",
                level.as_str(),
                self.name,
                self.elapsed_ms(),
                message
            );
        }
    }
}
