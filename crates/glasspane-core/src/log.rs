//! Append-only file logger.
//!
//! Lines go to `~/.config/glasspane/logs/glasspane.log`. Once the file
//! grows past `max_file_mb` it is renamed to `glasspane.log.1`, replacing
//! any older backup, and a fresh file is started.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<FileLog>> = OnceLock::new();

const LOG_FILE_NAME: &str = "glasspane.log";

/// The `[log]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Off unless the user opts in.
    pub enabled: bool,
    /// "debug", "info", "warn", or "error". Unknown values mean "info".
    pub level: String,
    /// Rotation threshold in megabytes; 0 disables rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct FileLog {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

/// Starts file logging if `config.enabled` is set.
///
/// Returns the log file path on success. Failing to open the file is not
/// an error; the overlay simply runs without a log. Only the first call
/// has any effect.
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    if !config.enabled {
        return None;
    }
    let dir = crate::config::config_dir()?.join("logs");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    let written = file.metadata().map(|m| m.len()).unwrap_or(0);

    let log = FileLog {
        file,
        path: path.clone(),
        min_level: Level::parse(&config.level),
        max_bytes: config.max_file_mb.saturating_mul(1024 * 1024),
        written,
    };
    LOGGER.set(Mutex::new(log)).ok()?;
    Some(path)
}

/// Appends one line when `level` passes the configured filter.
///
/// A no-op before [`init`] or when logging is disabled.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(lock) = LOGGER.get() else {
        return;
    };
    let Ok(mut log) = lock.lock() else {
        return;
    };
    if level < log.min_level {
        return;
    }

    let line = format_line(&clock(), level, args);
    if log.file.write_all(line.as_bytes()).is_ok() {
        log.written += line.len() as u64;
    }
    if log.max_bytes > 0 && log.written >= log.max_bytes {
        log.rotate();
    }
}

impl FileLog {
    fn rotate(&mut self) {
        let _ = fs::rename(&self.path, backup_path(&self.path));
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = file;
        }
        self.written = 0;
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

fn format_line(clock: &str, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{clock} {:<5} {args}\n", level.label())
}

/// UTC wall-clock time of day, `HH:MM:SS.mmm`.
fn clock() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        now.subsec_millis()
    )
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parse_accepts_aliases_and_defaults_to_info() {
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse(" warning "), Level::Warn);
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn backup_appends_suffix() {
        let path = Path::new("/tmp/logs/glasspane.log");

        assert_eq!(backup_path(path), PathBuf::from("/tmp/logs/glasspane.log.1"));
    }

    #[test]
    fn line_has_clock_padded_level_and_message() {
        let line = format_line("12:00:00.000", Level::Info, format_args!("moved {}", 3));

        assert_eq!(line, "12:00:00.000 INFO  moved 3\n");
    }

    #[test]
    fn write_before_init_is_a_no_op() {
        write(Level::Error, format_args!("dropped"));
    }
}
