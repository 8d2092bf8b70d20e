use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "task-tracker";
pub const ENV_PREFIX: &str = "TASK_TRACKER";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the stored records.
    pub data_dir: PathBuf,
    /// A `tracing_subscriber::EnvFilter` directive, e.g. `info` or `task_tracker=debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Layers defaults, an optional `task-tracker.toml` in the working
    /// directory, then `TASK_TRACKER_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_deserialize()
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("task-tracker"))
        .unwrap_or_else(|| PathBuf::from(".task-tracker"))
}
