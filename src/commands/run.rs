use std::io::{self, IsTerminal};
use std::path::Path;

use taskmate::color;
use taskmate::config::{Config, UiMode};
use taskmate::console::run_console;
use taskmate::interpreter::Interpreter;
use taskmate::log::SessionLogger;
use taskmate::shutdown;
use taskmate::storage::Storage;
use taskmate::tui::run_tui;

/// Start an interactive session.
pub fn cmd_run(config: &Config) -> Result<(), String> {
    let storage = Storage::open(&config.files_tasks)
        .map_err(|e| format!("failed to open save file {}: {}", config.files_tasks, e))?;

    let logger = if config.log_enabled {
        open_logger(config, storage.path())
    } else {
        None
    };

    let (mut interp, report) = Interpreter::start(storage, logger)
        .map_err(|e| format!("failed to load {}: {}", config.files_tasks, e))?;

    if report.skipped > 0 {
        eprintln!(
            "{}",
            color::warning(&format!(
                "warning: skipped {} unreadable line(s) in {}; they will be dropped on the next change",
                report.skipped, config.files_tasks
            ))
        );
    }

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    if config.ui_mode == UiMode::Tui && interactive {
        return run_tui(&mut interp).map_err(|e| format!("terminal error: {}", e));
    }

    if let Err(e) = shutdown::register_handler() {
        eprintln!("warning: {}", e);
    }

    let colored = io::stdout().is_terminal();
    run_console(&mut interp, io::stdin().lock(), io::stdout().lock(), colored)
        .map_err(|e| format!("console error: {}", e))
}

/// Open the diagnostics log, or run without one if it cannot be written.
fn open_logger(config: &Config, tasks_file: &Path) -> Option<SessionLogger> {
    let logger = SessionLogger::new(Path::new(&config.files_log_dir))
        .with_max_lines(config.log_max_lines);
    match logger.log_session_start(tasks_file) {
        Ok(()) => Some(logger),
        Err(e) => {
            eprintln!(
                "warning: logging disabled, cannot write {}: {}",
                logger.path.display(),
                e
            );
            None
        }
    }
}
