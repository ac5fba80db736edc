//! Account and endpoint settings for the CLI.
//!
//! Read from `config.toml` (see [`resolve_config_path`]), written by
//! `sdjson init`, and overlaid with `SDJSON_USERNAME` / `SDJSON_PASSWORD`.

#[allow(clippy::module_inception)]
mod config;
mod paths;

pub use config::AppConfig;
pub use paths::resolve_config_path;
