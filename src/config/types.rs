use std::fs;
use std::path::Path;

use super::cli::CliArgs;
use super::{env, toml};
use crate::log::DEFAULT_MAX_LINES;
use crate::storage::DEFAULT_TASKS_FILE;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "taskmate.toml";

/// Front end used for an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Full-screen chat view.
    #[default]
    Tui,
    /// Plain line-by-line prompt.
    Console,
}

impl UiMode {
    /// Parse UI mode from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tui" => Some(Self::Tui),
            "console" => Some(Self::Console),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tui => "tui",
            Self::Console => "console",
        }
    }
}

/// Taskmate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the save file.
    pub files_tasks: String,
    /// Path to log directory.
    pub files_log_dir: String,
    /// Write the diagnostics log.
    pub log_enabled: bool,
    /// Lines kept in the log before it is rotated.
    pub log_max_lines: usize,
    /// Front end for `run`.
    pub ui_mode: UiMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files_tasks: DEFAULT_TASKS_FILE.to_string(),
            files_log_dir: "data/logs".to_string(),
            log_enabled: true,
            log_max_lines: DEFAULT_MAX_LINES,
            ui_mode: UiMode::Tui,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults. An explicit
    /// `--config` path must exist; the default `taskmate.toml` is optional.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            config.merge_from(&Self::load_from_file(path)?);
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            config.merge_from(&Self::load_from_file(DEFAULT_CONFIG_FILE)?);
        }

        config.apply_env();
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ConfigError::Io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::parse_toml(&content)
    }

    /// Parse TOML content into configuration.
    pub(super) fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.tasks_file {
            self.files_tasks = path.clone();
        }
        if let Some(ref path) = args.log_dir {
            self.files_log_dir = path.clone();
        }
        if args.no_log {
            self.log_enabled = false;
        }
        if args.no_tui {
            self.ui_mode = UiMode::Console;
        }
    }

    /// Merge values from another config (for file-based config).
    pub(super) fn merge_from(&mut self, other: &Self) {
        self.files_tasks = other.files_tasks.clone();
        self.files_log_dir = other.files_log_dir.clone();
        self.log_enabled = other.log_enabled;
        self.log_max_lines = other.log_max_lines;
        self.ui_mode = other.ui_mode;
    }

    /// Generate default taskmate.toml content.
    pub fn default_toml() -> String {
        let defaults = Self::default();
        format!(
            r#"# Taskmate configuration

[files]
tasks = "{}"
log_dir = "{}"

[log]
enabled = {}
max_lines = {}

[ui]
mode = "{}"  # tui or console
"#,
            defaults.files_tasks,
            defaults.files_log_dir,
            defaults.log_enabled,
            defaults.log_max_lines,
            defaults.ui_mode.as_str()
        )
    }

    /// Write [`Config::default_toml`] to `path`, refusing to overwrite.
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::Io(format!(
                "{} already exists",
                path.display()
            )));
        }
        fs::write(path, Self::default_toml())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O error reading or writing a config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
