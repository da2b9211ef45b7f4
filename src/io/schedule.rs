//! Load the decision schedule from TOML.
//!
//! The schedule shipped in `config/schedule.toml` is compiled in and used when
//! no `--config` is given.

use std::path::Path;

use crate::domain::ScheduleConfig;
use crate::error::AppError;
use crate::schedule::Schedule;

pub const BUILTIN_SCHEDULE: &str = include_str!("../../config/schedule.toml");

/// Load `path`, or the built-in schedule when `path` is `None`.
pub fn load_schedule(path: Option<&Path>) -> Result<Schedule, AppError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::config(format!("Failed to read schedule '{}': {e}", path.display()))
            })?;
            log::info!("loaded schedule from {}", path.display());
            parse_schedule(&text, &path.display().to_string())
        }
        None => parse_schedule(BUILTIN_SCHEDULE, "built-in schedule"),
    }
}

/// Parse and validate schedule TOML; `origin` only feeds error messages.
pub fn parse_schedule(text: &str, origin: &str) -> Result<Schedule, AppError> {
    let config: ScheduleConfig = toml::from_str(text)
        .map_err(|e| AppError::config(format!("Invalid schedule ({origin}): {e}")))?;
    Schedule::from_config(config)
        .map_err(|e| AppError::config(format!("Invalid schedule ({origin}): {e}")))
}
