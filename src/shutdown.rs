//! Ctrl+C handling for console sessions.
//!
//! Every command is saved before the next line is read, so there is nothing
//! to flush on interrupt: the handler prints the farewell to stderr and exits.
//!
//! # Example
//!
//! ```ignore
//! use taskmate::shutdown;
//!
//! // Register the Ctrl+C handler before reading input
//! shutdown::register_handler()?;
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::interpreter::FAREWELL;

/// How many times Ctrl+C was pressed.
static INTERRUPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Exit status used after an interrupt.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Register the Ctrl+C handler.
///
/// Should be called once at program startup, and only for the console front
/// end: the TUI reads Ctrl+C as a key while the terminal is in raw mode.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        let code = on_interrupt(&mut io::stderr());
        std::process::exit(code);
    })
    .map_err(|e| format!("failed to register Ctrl+C handler: {}", e))
}

/// Record an interrupt and say goodbye. Returns the exit status to use.
fn on_interrupt<W: Write>(out: &mut W) -> i32 {
    INTERRUPT_COUNT.fetch_add(1, Ordering::SeqCst);
    let _ = writeln!(out, "\n{}", FAREWELL);
    let _ = out.flush();
    INTERRUPT_EXIT_CODE
}

/// Get the number of interrupts received.
pub fn interrupt_count() -> usize {
    INTERRUPT_COUNT.load(Ordering::SeqCst)
}
