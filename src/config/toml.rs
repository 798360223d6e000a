use super::types::{Config, ConfigError, UiMode};

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        // Handle section headers like [files]
        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].trim().to_string();
            continue;
        }

        let Some((key, value)) = parse_toml_line(line) else {
            return Err(ConfigError::Parse(format!("expected `key = value`: {}", line)));
        };

        let full_key = if current_section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", current_section, key)
        };

        match full_key.as_str() {
            "files.tasks" => {
                config.files_tasks = value.trim_matches('"').to_string();
            }
            "files.log_dir" => {
                config.files_log_dir = value.trim_matches('"').to_string();
            }
            "log.enabled" => {
                config.log_enabled = match value {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(ConfigError::Parse(format!(
                            "invalid log.enabled: {}",
                            value
                        )))
                    }
                };
            }
            "log.max_lines" => {
                config.log_max_lines = value
                    .parse()
                    .map_err(|_| ConfigError::Parse(format!("invalid log.max_lines: {}", value)))?;
            }
            "ui.mode" => {
                let mode = value.trim_matches('"');
                config.ui_mode = UiMode::parse(mode)
                    .ok_or_else(|| ConfigError::Parse(format!("invalid ui.mode: {}", mode)))?;
            }
            _ => {} // Ignore unknown keys
        }
    }

    Ok(config)
}

/// Parse a TOML line into key-value pair.
fn parse_toml_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Drop a trailing `# comment` that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}
