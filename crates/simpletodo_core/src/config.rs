//! Application configuration.
//!
//! Values resolve in order: explicit override, environment variable, default.

use crate::logging::default_log_level;
use crate::store::list_store::{FileListStore, DATA_FILE_NAME};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "SIMPLETODO_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "SIMPLETODO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SIMPLETODO_LOG_DIR";

const DEFAULT_DIR_NAME: &str = "simpletodo";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the persisted list file.
    pub data_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rotating log files.
    pub log_dir: PathBuf,
}

/// Optional overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves settings from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Same as `resolve` with an injectable environment lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let env_value = |key: &str| {
            env(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = overrides
            .data_dir
            .or_else(|| env_value(ENV_DATA_DIR).map(PathBuf::from))
            .unwrap_or_else(default_base_dir);
        let log_level = overrides
            .log_level
            .or_else(|| env_value(ENV_LOG_LEVEL))
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = overrides
            .log_dir
            .or_else(|| env_value(ENV_LOG_DIR).map(PathBuf::from))
            .unwrap_or_else(|| data_dir.join("logs"));

        Self {
            data_dir,
            log_level,
            log_dir: absolutize(log_dir),
        }
    }

    /// Path of the persisted list file.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// File store rooted at `data_dir`.
    pub fn list_store(&self) -> FileListStore {
        FileListStore::in_dir(&self.data_dir)
    }
}

fn default_base_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DIR_NAME)
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigOverrides, ENV_DATA_DIR, ENV_LOG_LEVEL};
    use std::path::PathBuf;

    #[test]
    fn overrides_win_over_environment() {
        let config = AppConfig::resolve_with(
            ConfigOverrides {
                data_dir: Some(PathBuf::from("/srv/todo")),
                log_level: Some("warn".to_string()),
                log_dir: None,
            },
            |key| match key {
                ENV_DATA_DIR => Some("/env/todo".to_string()),
                ENV_LOG_LEVEL => Some("trace".to_string()),
                _ => None,
            },
        );
        assert_eq!(config.data_dir, PathBuf::from("/srv/todo"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/srv/todo/logs"));
        assert_eq!(config.data_file(), PathBuf::from("/srv/todo/data.txt"));
    }

    #[test]
    fn blank_environment_values_fall_back_to_defaults() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), |_| {
            Some("   ".to_string())
        });
        assert!(config.data_dir.ends_with("simpletodo"));
        assert!(config.log_dir.is_absolute());
        assert!(!config.log_level.is_empty());
    }
}
