//! Application configuration module.
//!
//! Loads the TOML config file, applies environment overrides and
//! validates the result once at startup.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
