use crate::task::{Moment, Span, Task, TaskKind};

use super::CommandError;

/// A task field that `update` can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Any task.
    Description,
    /// Deadlines only (`date` or `by`).
    Date,
    /// Event start.
    From,
    /// Event end.
    To,
}

impl Field {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "description" => Some(Self::Description),
            "date" | "by" => Some(Self::Date),
            "from" => Some(Self::From),
            "to" => Some(Self::To),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Date => "date",
            Self::From => "from",
            Self::To => "to",
        }
    }
}

/// Build the replacement for `task` with one field changed.
///
/// The completion flag carries over. Event boundaries must keep the same
/// form as the boundary that is left untouched.
pub fn apply_update(task: &Task, field: Field, value: &str) -> Result<Task, CommandError> {
    let invalid = || CommandError::InvalidField {
        field,
        kind: task.kind().name(),
    };

    let updated = match (*task.kind(), field) {
        (kind, Field::Description) => Task::new(value, kind)?,
        (TaskKind::Deadline { .. }, Field::Date) => {
            Task::deadline(task.description(), Moment::parse(value)?)?
        }
        (TaskKind::Event { span }, Field::From) => {
            let span = Span::new(Moment::parse(value)?, span.end())?;
            Task::event(task.description(), span)?
        }
        (TaskKind::Event { span }, Field::To) => {
            let span = Span::new(span.start(), Moment::parse(value)?)?;
            Task::event(task.description(), span)?
        }
        _ => return Err(invalid()),
    };

    Ok(updated.with_done(task.is_done()))
}
