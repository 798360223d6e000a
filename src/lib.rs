//! Taskmate: a personal task tracker driven by one-line commands.
//!
//! Tasks (to-dos, deadlines and events) live in an ordered list that is
//! mirrored to a plain-text save file after every change.
//!
//! ## Layout
//!
//! - [`task`] - task model, save-line format and the ordered store
//! - [`command`] - parsing user input into typed commands
//! - [`storage`] - the save file
//! - [`interpreter`] - applying commands to a session
//! - [`console`] and [`tui`] - front ends

pub mod color;
pub mod command;
pub mod config;
pub mod console;
pub mod interpreter;
pub mod log;
pub mod shutdown;
pub mod storage;
pub mod task;
#[doc(hidden)]
pub mod testutil;
pub mod tui;
