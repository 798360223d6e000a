//! Interactive command parsing.
//!
//! Turns one input line into a typed [`Command`]. Parsing is pure: dates are
//! validated here so a rejected command never reaches the task store.

mod update;


use std::fmt;

use crate::task::{DateParseError, IndexError, Moment, Span, TaskError};

pub use update::{apply_update, Field};

const BY_MARKER: &str = " /by ";
const FROM_MARKER: &str = " /from ";
const TO_MARKER: &str = " /to ";

/// Usage strings shown when a command is malformed.
pub mod usage {
    pub const TODO: &str = "todo <description>";
    pub const DEADLINE: &str = "deadline <description> /by <date>";
    pub const EVENT: &str = "event <description> /from <date> /to <date>";
    pub const MARK: &str = "mark <task number>";
    pub const UNMARK: &str = "unmark <task number>";
    pub const DELETE: &str = "delete <task number>";
    pub const FIND: &str = "find <keyword>";
    pub const UPDATE: &str = "update <task number> <field> <new value>";
}

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Todo { description: String },
    Deadline { description: String, by: Moment },
    Event { description: String, span: Span },
    Mark { ordinal: i64 },
    Unmark { ordinal: i64 },
    Delete { ordinal: i64 },
    Find { query: String },
    Update { ordinal: i64, field: Field, value: String },
    List,
    Bye,
}

impl Command {
    /// Whether running this command can change the task store.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Find { .. } | Self::List | Self::Bye)
    }

    /// Keyword the command was invoked with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Todo { .. } => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
            Self::Mark { .. } => "mark",
            Self::Unmark { .. } => "unmark",
            Self::Delete { .. } => "delete",
            Self::Find { .. } => "find",
            Self::Update { .. } => "update",
            Self::List => "list",
            Self::Bye => "bye",
        }
    }
}

/// Parse one line of user input.
///
/// The keyword is the first whitespace-separated word and is case-sensitive.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }

    let (keyword, args) = match line.find(char::is_whitespace) {
        Some(end) => {
            let sep_len = line[end..].chars().next().map_or(1, char::len_utf8);
            (&line[..end], &line[end + sep_len..])
        }
        None => (line, ""),
    };

    match keyword {
        "todo" => parse_todo(args),
        "deadline" => parse_deadline(args),
        "event" => parse_event(args),
        "mark" => parse_ordinal(args, usage::MARK).map(|ordinal| Command::Mark { ordinal }),
        "unmark" => parse_ordinal(args, usage::UNMARK).map(|ordinal| Command::Unmark { ordinal }),
        "delete" => parse_ordinal(args, usage::DELETE).map(|ordinal| Command::Delete { ordinal }),
        "find" => parse_find(args),
        "update" => parse_update(args),
        "list" => Ok(Command::List),
        "bye" => Ok(Command::Bye),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_todo(args: &str) -> Result<Command, CommandError> {
    let description = args.trim();
    if description.is_empty() {
        return Err(CommandError::Malformed(usage::TODO));
    }
    Ok(Command::Todo {
        description: description.to_string(),
    })
}

fn parse_deadline(args: &str) -> Result<Command, CommandError> {
    let (description, date) = args
        .split_once(BY_MARKER)
        .ok_or(CommandError::Malformed(usage::DEADLINE))?;
    let description = required(description, usage::DEADLINE)?;
    let by = Moment::parse(required(date, usage::DEADLINE)?)?;
    Ok(Command::Deadline {
        description: description.to_string(),
        by,
    })
}

fn parse_event(args: &str) -> Result<Command, CommandError> {
    let (description, range) = args
        .split_once(FROM_MARKER)
        .ok_or(CommandError::Malformed(usage::EVENT))?;
    let (start, end) = range
        .split_once(TO_MARKER)
        .ok_or(CommandError::Malformed(usage::EVENT))?;
    let description = required(description, usage::EVENT)?;
    let start = Moment::parse(required(start, usage::EVENT)?)?;
    let end = Moment::parse(required(end, usage::EVENT)?)?;
    let span = Span::new(start, end)?;
    Ok(Command::Event {
        description: description.to_string(),
        span,
    })
}

fn parse_find(args: &str) -> Result<Command, CommandError> {
    if args.trim().is_empty() {
        return Err(CommandError::Malformed(usage::FIND));
    }
    Ok(Command::Find {
        query: args.trim_start().to_string(),
    })
}

fn parse_update(args: &str) -> Result<Command, CommandError> {
    let (ordinal, rest) = split_token(args);
    let (field, value) = split_token(rest);
    let value = value.trim();
    if ordinal.is_empty() || field.is_empty() || value.is_empty() {
        return Err(CommandError::Malformed(usage::UPDATE));
    }

    let ordinal = parse_ordinal(ordinal, usage::UPDATE)?;
    let field = Field::parse(field).ok_or_else(|| CommandError::UnknownField(field.to_string()))?;
    Ok(Command::Update {
        ordinal,
        field,
        value: value.to_string(),
    })
}

/// Exactly one integer token.
fn parse_ordinal(args: &str, usage: &'static str) -> Result<i64, CommandError> {
    let mut tokens = args.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => token.parse().map_err(|_| CommandError::Malformed(usage)),
        _ => Err(CommandError::Malformed(usage)),
    }
}

/// Split off the first whitespace-delimited token.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}

fn required<'a>(part: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    let part = part.trim();
    if part.is_empty() {
        Err(CommandError::Malformed(usage))
    } else {
        Ok(part)
    }
}

/// Why a command was rejected. Rejected commands never mutate anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank input line.
    Empty,
    /// Keyword not recognised.
    Unknown(String),
    /// Wrong token count or missing marker; carries the expected usage.
    Malformed(&'static str),
    /// Date matches neither accepted form.
    Date(DateParseError),
    /// Values would violate a task invariant.
    Task(TaskError),
    /// Task number outside the list.
    Index(IndexError),
    /// Update field name not recognised at all.
    UnknownField(String),
    /// Update field does not apply to this kind of task.
    InvalidField { field: Field, kind: &'static str },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "please enter a command"),
            Self::Unknown(keyword) => write!(f, "unknown command: {}", keyword),
            Self::Malformed(usage) => write!(f, "invalid task invocation! usage: {}", usage),
            Self::Date(err) => write!(f, "{}", err),
            Self::Task(err) => write!(f, "{}", err),
            Self::Index(err) => write!(f, "{}", err),
            Self::UnknownField(field) => write!(
                f,
                "unknown field `{}`: use description, date, from or to",
                field
            ),
            Self::InvalidField { field, kind } => {
                write!(f, "{} tasks have no `{}` field", kind, field.as_str())
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateParseError> for CommandError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

impl From<TaskError> for CommandError {
    fn from(value: TaskError) -> Self {
        Self::Task(value)
    }
}

impl From<IndexError> for CommandError {
    fn from(value: IndexError) -> Self {
        Self::Index(value)
    }
}
