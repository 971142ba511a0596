//! Configuration management.
//!
//! Handles loading, parsing, and validation of TOML configuration files.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::{Config, Defaults, LoggingConfig};
