//! Session diagnostics log with rotation.
//!
//! Every line is `YYYY-MM-DD HH:MM:SS | LEVEL | message`. The file is rotated
//! to a timestamped backup once it grows past a configurable line limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "taskmate.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR_WIDTH: usize = 70;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// File logger for one assistant session.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    /// Path to the log file.
    pub path: PathBuf,
    /// Maximum lines before rotation.
    pub max_lines: usize,
}

impl SessionLogger {
    /// Create a logger writing to `<log_dir>/taskmate.log`.
    pub fn new(log_dir: &Path) -> Self {
        Self {
            path: log_dir.join(LOG_FILE_NAME),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Create a logger with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Write a log entry, rotating the file once it grows past `max_lines`.
    pub fn log(&self, level: Level, message: &str) -> io::Result<()> {
        // Keep one entry per line even if a message carries user input
        let message = message.replace(['\n', '\r'], " / ");
        self.append(&format!(
            "{} | {} | {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            level.as_str(),
            message
        ))?;

        if self.line_count()? > self.max_lines {
            rotate_log(&self.path)?;
        }
        Ok(())
    }

    pub fn info(&self, message: &str) -> io::Result<()> {
        self.log(Level::Info, message)
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.log(Level::Warn, message)
    }

    pub fn error(&self, message: &str) -> io::Result<()> {
        self.log(Level::Error, message)
    }

    /// Write a banner marking the start of a session on `tasks_file`.
    pub fn log_session_start(&self, tasks_file: &Path) -> io::Result<()> {
        let rule = "=".repeat(SEPARATOR_WIDTH);
        self.append(&format!(
            "\n{rule}\n=== Session started at {} ({}) ===\n{rule}\n\n",
            Local::now().format(TIMESTAMP_FORMAT),
            tasks_file.display()
        ))
    }

    /// Number of lines currently in the log file.
    pub fn line_count(&self) -> io::Result<usize> {
        match File::open(&self.path) {
            Ok(file) => Ok(BufReader::new(file).lines().count()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn append(&self, text: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

/// Move `path` aside to `<name>.<stamp>.bak` and start an empty file.
///
/// Backups made within the same second get a numeric suffix.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE_NAME.to_string());
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let mut backup = path.with_file_name(format!("{}.{}.bak", name, stamp));
    let mut n = 1;
    while backup.exists() {
        backup = path.with_file_name(format!("{}.{}-{}.bak", name, stamp, n));
        n += 1;
    }

    fs::rename(path, &backup)?;
    File::create(path)?;
    Ok(())
}
