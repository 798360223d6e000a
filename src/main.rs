use std::env;
use std::process;

use taskmate::config::{self, Command, Config};

mod commands;

use commands::{cmd_init, cmd_run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = config::parse_args(env::args());

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("taskmate {}", VERSION);
        return;
    }

    if let Some(ref unknown) = cli.unknown {
        eprintln!("error: unknown command: {}", unknown);
        eprintln!("Run 'taskmate --help' for usage.");
        process::exit(1);
    }

    // Default command is Run if none specified
    let command = cli.command.clone().unwrap_or(Command::Run);

    let result = match command {
        Command::Init => cmd_init(&cli),
        Command::Run => Config::load(&cli)
            .map_err(|e| e.to_string())
            .and_then(|config| cmd_run(&config)),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"taskmate - personal task tracker

USAGE:
    taskmate [OPTIONS] [COMMAND]

COMMANDS:
    run               Start an interactive session (default)
    init              Write a default taskmate.toml

OPTIONS:
    -h, --help              Show this help message
    -V, --version           Show version
    -c, --config <PATH>     Path to config file (default: taskmate.toml)
    --tasks-file <PATH>     Path to the save file (default: data/tasks.txt)
    --log-dir <PATH>        Path to the log directory (default: data/logs)
    --no-log                Don't write the diagnostics log
    --no-tui                Use the plain console instead of the chat view

SESSION COMMANDS:
    todo <description>
    deadline <description> /by <date>
    event <description> /from <date> /to <date>
    mark <n>  unmark <n>  delete <n>
    update <n> <description|date|from|to> <value>
    find <text>
    list
    bye

    Dates are YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS; both ends of an event
    use the same form.

ENVIRONMENT:
    TASKMATE_FILES_TASKS, TASKMATE_FILES_LOG_DIR, TASKMATE_LOG_ENABLED,
    TASKMATE_LOG_MAX_LINES, TASKMATE_UI_MODE
"#
    );
}
