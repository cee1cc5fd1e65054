//! Configuration loading and discovery for `gallery.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{Collection, GalleryConfig};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "gallery.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SEAGALLERY_CONFIG";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse gallery.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the API base URL
    pub api_url: Option<String>,
    /// Use the legacy `/creatures` endpoints
    pub legacy: Option<bool>,
}

/// Locate gallery.toml.
///
/// `SEAGALLERY_CONFIG` names the file outright when set, even if it does not
/// exist, so a typo there surfaces as a read error. Otherwise the nearest
/// gallery.toml at or above the working directory wins, then the user's.
pub fn find_config() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }

    env::current_dir().ok().and_then(|cwd| find_config_from(&cwd)).or_else(find_user_config)
}

/// The user's gallery.toml, if it exists.
pub fn find_user_config() -> Option<PathBuf> {
    user_config_path(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME")).filter(|path| path.is_file())
}

/// `$XDG_CONFIG_HOME/seagallery/gallery.toml`, with `~/.config` standing in
/// for an unset or empty `XDG_CONFIG_HOME`.
fn user_config_path(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let config_home = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home?).join(".config"),
    };
    Some(config_home.join("seagallery").join(CONFIG_FILE_NAME))
}

/// Nearest gallery.toml in `start` or one of its ancestors. Directories
/// that happen to be named gallery.toml are skipped.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.is_file())
}

/// Load configuration from a gallery.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("site/gallery.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading configuration");
            let contents = fs::read_to_string(&p)?;
            parse_config(&contents)
        }
        None => Ok(GalleryConfig::default()),
    }
}

/// Parse and validate configuration text.
///
/// Used directly by the browser entry point, which has no file system.
pub fn parse_config(contents: &str) -> Result<GalleryConfig, ConfigError> {
    let config: GalleryConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut GalleryConfig, overrides: &CliOverrides) {
    if let Some(ref api_url) = overrides.api_url {
        config.api.base_url = api_url.clone();
    }

    if let Some(legacy) = overrides.legacy {
        config.api.collection = if legacy { Collection::Creatures } else { Collection::Species };
    }
}
