//! Task model, save-file line format, and the in-memory task store.
//!
//! One task per save line:
//! - `1. [T][ ] read book` (to-do, not done)
//! - `2. [D][X] submit report (by: 2024-12-31)` (deadline, done)
//! - `3. [E][ ] trip (from: 2024-06-01T09:00:00 to: 2024-06-10T18:00:00)` (event)

mod list;
mod model;
mod moment;
mod parse;


pub use list::{IndexError, TaskList};
pub use model::{Task, TaskError, TaskKind};
pub use moment::{DateParseError, Moment, Span, DATETIME_FORMAT, DATE_FORMAT};
pub use parse::{parse_save_line, SaveLine, SaveLineError};
