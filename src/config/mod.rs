//! Configuration module for the gallery
//!
//! Provides types and parsing for `gallery.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, find_user_config, load_config, merge_cli_overrides, parse_config, CliOverrides,
    ConfigError, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
pub use schema::*;
