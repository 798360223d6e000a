//! Save-file persistence.
//!
//! One line per task, `<ordinal>. <task line>`, in list order. Fresh tasks are
//! appended; any change to existing positions rewrites the whole file.
//!
//! A rewrite truncates the file before writing it back, so a crash in the
//! middle of one can leave a truncated file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use crate::task::Task;

/// Default save file, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "data/tasks.txt";

/// Owner of the single save file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open the save file, creating it and its parent directories if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the save file in order.
    ///
    /// Each line is decoded separately, so one line that is not UTF-8 does
    /// not hide the others.
    pub fn load_all(&self) -> io::Result<Vec<Result<String, FromUtf8Error>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                File::create(&self.path)?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut lines: Vec<_> = bytes
            .split(|&b| b == b'\n')
            .map(|raw| String::from_utf8(raw.strip_suffix(b"\r").unwrap_or(raw).to_vec()))
            .collect();
        // A trailing newline leaves one empty segment behind
        if bytes.is_empty() || bytes.ends_with(b"\n") {
            lines.pop();
        }
        Ok(lines)
    }

    /// Append a freshly added task at its 1-based `ordinal`.
    pub fn append_one(&self, task: &Task, ordinal: usize) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_line(ordinal, task))
    }

    /// Truncate the file and write every task with its current ordinal.
    pub fn rewrite_all(&self, tasks: &[Task]) -> io::Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for (i, task) in tasks.iter().enumerate() {
            writeln!(writer, "{}", format_line(i + 1, task))?;
        }
        writer.flush()
    }
}

/// Format one save line.
pub fn format_line(ordinal: usize, task: &Task) -> String {
    format!("{}. {}", ordinal, task.to_line())
}
