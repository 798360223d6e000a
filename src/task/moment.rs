use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use super::model::TaskError;

/// Calendar date format used on the command line and in the save file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used on the command line and in the save file.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Older save files carry date-times without seconds when seconds were zero.
const DATETIME_FORMAT_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

/// A point in time attached to a deadline or an event boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    /// Pure calendar day: `2024-12-31`
    Date(NaiveDate),
    /// Day plus time of day: `2024-12-31T23:59:00`
    DateTime(NaiveDateTime),
}

impl Moment {
    /// Parse a date or date-time.
    ///
    /// The form is chosen by the presence of a `T` in the input, which keeps
    /// existing save files readable; no fallback between forms is attempted.
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let input = input.trim();
        if input.contains('T') {
            NaiveDateTime::parse_from_str(input, DATETIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(input, DATETIME_FORMAT_NO_SECONDS))
                .map(Self::DateTime)
                .map_err(|_| DateParseError::new(input))
        } else {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .map(Self::Date)
                .map_err(|_| DateParseError::new(input))
        }
    }

    /// Whether this moment is a pure calendar date.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// Start and end of an event, both dates or both date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Dates(NaiveDate, NaiveDate),
    DateTimes(NaiveDateTime, NaiveDateTime),
}

impl Span {
    /// Build a span from two moments of the same form, end not before start.
    pub fn new(start: Moment, end: Moment) -> Result<Self, TaskError> {
        let span = Self::from_saved(start, end)?;
        if span.end_before_start() {
            return Err(TaskError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(span)
    }

    /// Build a span read back from the save file.
    ///
    /// Only the form is checked; older files may hold reversed ranges.
    pub fn from_saved(start: Moment, end: Moment) -> Result<Self, TaskError> {
        match (start, end) {
            (Moment::Date(s), Moment::Date(e)) => Ok(Self::Dates(s, e)),
            (Moment::DateTime(s), Moment::DateTime(e)) => Ok(Self::DateTimes(s, e)),
            _ => Err(TaskError::MixedSpan),
        }
    }

    pub fn start(&self) -> Moment {
        match *self {
            Self::Dates(s, _) => Moment::Date(s),
            Self::DateTimes(s, _) => Moment::DateTime(s),
        }
    }

    pub fn end(&self) -> Moment {
        match *self {
            Self::Dates(_, e) => Moment::Date(e),
            Self::DateTimes(_, e) => Moment::DateTime(e),
        }
    }

    fn end_before_start(&self) -> bool {
        match self {
            Self::Dates(s, e) => e < s,
            Self::DateTimes(s, e) => e < s,
        }
    }
}

/// A date string matched neither accepted grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date `{}`: use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            self.input
        )
    }
}

impl std::error::Error for DateParseError {}
