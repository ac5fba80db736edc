//! Location of `config.toml`.
//!
//! `--dir` wins. Otherwise the file lives under `$XDG_CONFIG_HOME/sdjson`,
//! falling back to `$HOME/.config/sdjson`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// File name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Directory name under the XDG config home.
const APP_DIR: &str = "sdjson";

/// Returns the config file path for the `--dir` override, if given.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set and no
/// override was given.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }
    // XDG says relative values are invalid and must be ignored.
    let config_home = match (xdg_config_home.filter(|p| p.is_absolute()), home) {
        (Some(xdg), _) => xdg,
        (None, Some(home)) => home.join(".config"),
        (None, None) => bail!("cannot locate the config file: set HOME or pass --dir"),
    };
    Ok(config_home.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_dir_override_ignores_environment() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let path = resolve_config_path(Some(&dir.path().to_path_buf())).unwrap();

        // Assert
        assert_eq!(path, dir.path().join("config.toml"));
    }

    #[test]
    fn test_xdg_config_home_preferred_over_home() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/listener")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/sdjson/config.toml"));
    }

    #[test]
    fn test_relative_xdg_config_home_falls_back_to_home() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(PathBuf::from("relative")),
            Some(PathBuf::from("/home/listener")),
        )
        .unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/listener/.config/sdjson/config.toml")
        );
    }

    #[test]
    fn test_no_location_is_an_error() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("--dir"));
    }

    #[test]
    fn test_saved_config_is_found_through_dir_override() {
        // Arrange
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("profile");
        let mut config = AppConfig::default();
        config.account.username = String::from("listener");
        config.save(&resolve_config_path(Some(&dir)).unwrap()).unwrap();

        // Act
        let reloaded = AppConfig::load(&resolve_config_path(Some(&dir)).unwrap()).unwrap();

        // Assert
        assert_eq!(reloaded.account.username, "listener");
    }
}
