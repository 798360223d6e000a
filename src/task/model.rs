use std::fmt;

use super::moment::{Moment, Span};

/// Variant-specific part of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Plain to-do: `[T]`
    ToDo,
    /// Due by a date or date-time: `[D] ... (by: <moment>)`
    Deadline { by: Moment },
    /// Spans two moments of the same form: `[E] ... (from: <a> to: <b>)`
    Event { span: Span },
}

impl TaskKind {
    /// Single-letter code written in the save file.
    pub fn code(&self) -> char {
        match self {
            Self::ToDo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }

    /// Human name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToDo => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
        }
    }
}

/// A single tracked task.
///
/// The description is validated on construction and never edited in place;
/// updates build a replacement task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Create a task of any kind, not yet done.
    pub fn new(description: impl Into<String>, kind: TaskKind) -> Result<Self, TaskError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        if description.contains(['\n', '\r']) {
            return Err(TaskError::MultilineDescription);
        }
        Ok(Self {
            description,
            done: false,
            kind,
        })
    }

    pub fn todo(description: impl Into<String>) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::ToDo)
    }

    pub fn deadline(description: impl Into<String>, by: Moment) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: impl Into<String>, span: Span) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Event { span })
    }

    /// Set the completion flag at construction time (used when loading).
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn code(&self) -> char {
        self.kind.code()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    /// Format this task as its save-file payload line (without the ordinal).
    pub fn to_line(&self) -> String {
        let mark = if self.done { 'X' } else { ' ' };
        match &self.kind {
            TaskKind::ToDo => format!("[T][{}] {}", mark, self.description),
            TaskKind::Deadline { by } => {
                format!("[D][{}] {} (by: {})", mark, self.description, by)
            }
            TaskKind::Event { span } => format!(
                "[E][{}] {} (from: {} to: {})",
                mark,
                self.description,
                span.start(),
                span.end()
            ),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// A task value that would break the model invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Description is empty or whitespace.
    EmptyDescription,
    /// Description would split a save line.
    MultilineDescription,
    /// Event mixes a date with a date-time.
    MixedSpan,
    /// Event ends before it starts.
    EndBeforeStart { start: String, end: String },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "the description of a task cannot be empty"),
            Self::MultilineDescription => write!(f, "the description must fit on one line"),
            Self::MixedSpan => write!(
                f,
                "event start and end must both be dates or both be date-times"
            ),
            Self::EndBeforeStart { start, end } => {
                write!(f, "event ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for TaskError {}
