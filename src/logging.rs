use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming a log file; overrides `LoggingConfig::file`.
pub const LOG_ENV_VAR: &str = "REDUX_APIS_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled unless `REDUX_APIS_LOG` or `config.file` names a
/// file. The filter comes from `RUST_LOG` when set, else `config.level`.
///
/// Log files are created with unique names to prevent conflicts when
/// several processes share a path: `{path}.{timestamp}.{pid}`.
///
/// Returns the path actually written to, or `None` when logging stays off
/// (including when a global subscriber is already installed).
pub fn init_tracing(config: &LoggingConfig) -> Option<PathBuf> {
    let log_path = std::env::var_os(LOG_ENV_VAR)
        .map(PathBuf::from)
        .or_else(|| config.file.clone())?;

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = PathBuf::from(format!("{}.{}.{}", log_path.display(), timestamp, pid));

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path.display());
        return None;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(unique_path)
}
