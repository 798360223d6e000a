//! Terminal color utilities using ANSI escape codes.
//!
//! Used by the console front end when stdout is a terminal.

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

use codes::*;

/// Horizontal rule framing each reply.
pub const RULE: &str = "____________________________________________________________";

/// Color success messages (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

/// Color error messages (red + bold).
pub fn error(text: &str) -> String {
    format!("{}{}{}{}", BOLD, RED, text, RESET)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", YELLOW, text, RESET)
}

/// Color headers (cyan).
pub fn info(text: &str) -> String {
    format!("{}{}{}", CYAN, text, RESET)
}

/// Dim text, used for completed tasks and the frame.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", DIM, text, RESET)
}

/// Colorize a reply line by line.
///
/// `Error:` and `Warning:` lines get their own colors, confirmation and
/// listing headers are highlighted, and completed tasks are dimmed.
pub fn response(message: &str) -> String {
    message
        .lines()
        .map(response_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn response_line(line: &str) -> String {
    if line.starts_with("Error:") {
        error(line)
    } else if line.starts_with("Warning:") {
        warning(line)
    } else if line.starts_with("Task successfully") {
        success(line)
    } else if line.starts_with("Displaying") {
        info(line)
    } else if line.contains("][X] ") {
        dim(line)
    } else {
        line.to_string()
    }
}
