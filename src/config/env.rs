use std::env;

use super::types::{Config, UiMode};

pub(super) fn apply_env(config: &mut Config) {
    apply_env_from(config, |key| env::var(key).ok());
}

/// Apply overrides from any variable source.
pub(super) fn apply_env_from<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var("TASKMATE_FILES_TASKS") {
        config.files_tasks = val;
    }
    if let Some(val) = var("TASKMATE_FILES_LOG_DIR") {
        config.files_log_dir = val;
    }
    if let Some(val) = var("TASKMATE_LOG_ENABLED") {
        config.log_enabled = val == "true" || val == "1";
    }
    if let Some(val) = var("TASKMATE_LOG_MAX_LINES") {
        if let Ok(n) = val.parse() {
            config.log_max_lines = n;
        }
    }
    if let Some(val) = var("TASKMATE_UI_MODE") {
        if let Some(mode) = UiMode::parse(&val) {
            config.ui_mode = mode;
        }
    }
}
