/// CLI arguments parsed from command line.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subcommand to execute.
    pub command: Option<Command>,
    /// First positional argument that is not a known subcommand.
    pub unknown: Option<String>,
    /// Path to config file.
    pub config: Option<String>,
    /// Path to the save file.
    pub tasks_file: Option<String>,
    /// Path to log directory.
    pub log_dir: Option<String>,
    /// Disable the diagnostics log.
    pub no_log: bool,
    /// Disable TUI mode (use plain line-by-line console).
    pub no_tui: bool,
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

/// Taskmate subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive session.
    Run,
    /// Write a default taskmate.toml.
    Init,
}

impl Command {
    /// Parse command from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "run" => Some(Self::Run),
            "init" => Some(Self::Init),
            _ => None,
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = args.next(),
            "--tasks-file" => cli.tasks_file = args.next(),
            "--log-dir" => cli.log_dir = args.next(),
            "--no-log" => cli.no_log = true,
            "--no-tui" => cli.no_tui = true,
            _ if !arg.starts_with('-') && cli.command.is_none() && cli.unknown.is_none() => {
                match Command::from_str(&arg) {
                    Some(command) => cli.command = Some(command),
                    None => cli.unknown = Some(arg),
                }
            }
            _ => {} // Ignore unknown flags
        }
    }

    cli
}
