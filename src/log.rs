//! File logging for blockflow.
//!
//! Levels as used in this crate:
//! - ERROR: a command failed (unreadable snapshot, bad config)
//! - WARN: malformed input the passes tolerate (self, dangling, or duplicate task ids)
//! - INFO: command start
//! - DEBUG: per-pass summaries (chain counts, root fallback, dropped edges)
//! - TRACE: every chain emitted by the flow walk
//!
//! Nothing is written until [`init`] has run, so library callers of the
//! analysis passes never touch the filesystem.
//!
//! `--debug` or `BLOCKFLOW_DEBUG=1` selects DEBUG; `BLOCKFLOW_DEBUG=trace`
//! selects TRACE.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

static SINK: OnceLock<Sink> = OnceLock::new();

struct Sink {
    path: PathBuf,
    level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Level for a `--debug` flag and an optional `BLOCKFLOW_DEBUG` value.
///
/// The env value wins when it asks for more detail than the flag.
pub fn resolve_level(debug_flag: bool, env: Option<&str>) -> LogLevel {
    let from_env = match env.map(|v| v.trim().to_lowercase()).as_deref() {
        Some("trace") => LogLevel::Trace,
        Some("1") | Some("true") | Some("debug") => LogLevel::Debug,
        _ => LogLevel::Info,
    };
    let from_flag = if debug_flag {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    from_env.max(from_flag)
}

/// Start logging to `~/.blockflow/blockflow.log`, truncating it.
///
/// Only the first call takes effect.
pub fn init(debug: bool) {
    let env = std::env::var("BLOCKFLOW_DEBUG").ok();
    let level = resolve_level(debug, env.as_deref());

    let Some(dir) = dirs::home_dir().map(|h| h.join(".blockflow")) else {
        return;
    };
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("blockflow.log");
    let _ = std::fs::write(&path, "");
    let _ = SINK.set(Sink { path, level });
}

/// Write `msg` if logging is initialized at `level` or finer.
pub fn log_at(level: LogLevel, msg: &str) {
    let Some(sink) = SINK.get() else {
        return;
    };
    if level > sink.level {
        return;
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&sink.path) {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] [{}] {}", timestamp, level.as_str(), msg);
    }
}

#[macro_export]
macro_rules! bflog {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! bflog_error {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! bflog_warn {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! bflog_debug {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! bflog_trace {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Trace, &format!($($arg)*))
    };
}
