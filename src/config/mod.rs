//! Configuration loading for taskmate.
//!
//! Supports taskmate.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs, Command};
pub use types::{Config, ConfigError, UiMode, DEFAULT_CONFIG_FILE};
