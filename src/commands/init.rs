use taskmate::config::{CliArgs, Config, DEFAULT_CONFIG_FILE};

/// Write a default config file.
pub fn cmd_init(cli: &CliArgs) -> Result<(), String> {
    let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);

    Config::write_default(path).map_err(|e| e.to_string())?;

    println!("Created {}", path);
    println!("  Edit it to choose where tasks and logs are kept.");
    println!("  Run 'taskmate' to start a session.");
    Ok(())
}
