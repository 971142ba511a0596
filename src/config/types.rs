use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::action::{DEFAULT_SEPARATOR, INIT_ACTION_TYPE};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tree-wide settings, read from the root node of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Type dispatched by `init()` (default: "@@redux/INIT").
    #[serde(default = "default_init_action_type")]
    pub init_action_type: String,
    /// Separator between namespace segments of action types (default: '/').
    #[serde(default = "default_separator")]
    pub separator: char,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Logging stays off unless this or `REDUX_APIS_LOG` is set.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_init_action_type() -> String {
    INIT_ACTION_TYPE.to_string()
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            init_action_type: default_init_action_type(),
            separator: default_separator(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
