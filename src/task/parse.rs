use std::fmt;

use super::model::{Task, TaskError};
use super::moment::{DateParseError, Moment, Span};

/// Separator between the ordinal and the task header.
const ORDINAL_SEPARATOR: &str = ". ";

/// `[T][ ] ` - code at offset 1, mark at offset 4, payload from offset 7.
const CODE_OFFSET: usize = 1;
const MARK_OFFSET: usize = 4;
const HEADER_LEN: usize = 7;

const DEADLINE_MARKER: &str = " (by: ";
const EVENT_MARKER: &str = " (from: ";
const EVENT_END_MARKER: &str = " to: ";

/// Header fields of a save line, before the payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveLine<'a> {
    /// Task code: `T`, `D` or `E`.
    pub code: char,
    /// `true` iff the mark is `X`.
    pub done: bool,
    /// Type-specific payload after the header.
    pub content: &'a str,
}

/// Split a save line into its header fields.
///
/// Expects `<ordinal>. [<code>][<mark>] <payload>`.
pub fn parse_save_line(line: &str) -> Result<SaveLine<'_>, SaveLineError> {
    let (_, rest) = line
        .split_once(ORDINAL_SEPARATOR)
        .ok_or(SaveLineError::MissingSeparator)?;

    let header = rest.get(..HEADER_LEN).ok_or(SaveLineError::TooShort)?;
    let bytes = header.as_bytes();
    if bytes[0] != b'[' || bytes[2] != b']' || bytes[3] != b'[' || bytes[5] != b']' || bytes[6] != b' '
    {
        return Err(SaveLineError::BadHeader(header.to_string()));
    }

    let code = bytes[CODE_OFFSET] as char;
    let done = bytes[MARK_OFFSET] == b'X';

    Ok(SaveLine {
        code,
        done,
        content: &rest[HEADER_LEN..],
    })
}

impl Task {
    /// Rebuild a task from a full save line.
    pub fn from_save_line(line: &str) -> Result<Self, SaveLineError> {
        let saved = parse_save_line(line)?;
        let task = match saved.code {
            'T' => Task::todo(saved.content)?,
            'D' => {
                let (description, by) = split_payload(saved.content, DEADLINE_MARKER)?;
                Task::deadline(description, Moment::parse(by)?)?
            }
            'E' => {
                let (description, range) = split_payload(saved.content, EVENT_MARKER)?;
                let (start, end) = range.split_once(EVENT_END_MARKER).ok_or_else(|| {
                    SaveLineError::BadPayload(format!("missing `to:` in `{}`", saved.content))
                })?;
                let span = Span::from_saved(Moment::parse(start)?, Moment::parse(end)?)?;
                Task::event(description, span)?
            }
            other => return Err(SaveLineError::UnknownCode(other)),
        };
        Ok(task.with_done(saved.done))
    }
}

/// Split `<description><marker><value>)` at the last marker occurrence.
fn split_payload<'a>(content: &'a str, marker: &str) -> Result<(&'a str, &'a str), SaveLineError> {
    let (description, tail) = content.rsplit_once(marker).ok_or_else(|| {
        SaveLineError::BadPayload(format!("missing `{}` in `{}`", marker.trim(), content))
    })?;
    let value = tail.strip_suffix(')').ok_or_else(|| {
        SaveLineError::BadPayload(format!("missing closing `)` in `{}`", content))
    })?;
    Ok((description, value))
}

/// Why a save line could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveLineError {
    /// No `". "` after the ordinal.
    MissingSeparator,
    /// Shorter than the fixed `[C][M] ` header.
    TooShort,
    /// Header brackets are not where they belong.
    BadHeader(String),
    /// Task code is not `T`, `D` or `E`.
    UnknownCode(char),
    /// Payload is missing a required marker.
    BadPayload(String),
    /// A stored date matches neither form.
    Date(DateParseError),
    /// Stored fields violate a task invariant.
    Task(TaskError),
}

impl fmt::Display for SaveLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "missing `. ` after the ordinal"),
            Self::TooShort => write!(f, "line is shorter than the task header"),
            Self::BadHeader(header) => write!(f, "malformed task header `{}`", header),
            Self::UnknownCode(code) => write!(f, "unknown task code `{}`", code),
            Self::BadPayload(msg) => write!(f, "malformed payload: {}", msg),
            Self::Date(err) => write!(f, "{}", err),
            Self::Task(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SaveLineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::Task(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateParseError> for SaveLineError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

impl From<TaskError> for SaveLineError {
    fn from(value: TaskError) -> Self {
        Self::Task(value)
    }
}
