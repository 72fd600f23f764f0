//! Configuration IO for the deploy widget.
//!
//! The widget options live in a single JSON or YAML file. The path comes from
//! an explicit CLI argument, the `HOOKDASH_CONFIG_PATH` environment variable,
//! or `~/.config/hookdash/widget.json`, in that order.

use std::fs;
use std::path::{Path, PathBuf};

use hookdash_types::WidgetConfig;
use thiserror::Error;
use tracing::debug;

use crate::path_processing::app_file_path;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "HOOKDASH_CONFIG_PATH";

/// Default filename for the widget options.
pub const CONFIG_FILE_NAME: &str = "widget.json";

/// Environment variable allowing callers to override the TUI log file path.
pub const LOG_PATH_ENV: &str = "HOOKDASH_LOG_PATH";

pub const LOG_FILE_NAME: &str = "hookdash.log";

/// Error surfaced when the widget configuration cannot be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML in config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Returns the default path for the widget configuration file.
pub fn default_config_path() -> PathBuf {
    app_file_path(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
}

/// Returns the explicit path when given, otherwise the default path.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(default_config_path)
}

/// Path of the log file used while the terminal UI owns the screen.
pub fn default_log_path() -> PathBuf {
    app_file_path(LOG_PATH_ENV, LOG_FILE_NAME)
}

/// Loads widget options from `path`.
///
/// A missing file is not an error: it yields an empty config so the widget
/// can show its "no sites" notice.
pub fn load_config_from_path(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found; using empty config");
            return Ok(WidgetConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };
    debug!(path = %path.display(), "loaded widget config");
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml"))
}
