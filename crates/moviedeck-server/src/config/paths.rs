//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory under the config root.
const APP_DIR: &str = "moviedeck";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - `--dir DIR` gives `DIR/config.toml`.
/// - Otherwise `$XDG_CONFIG_HOME/moviedeck/config.toml` when set.
/// - Otherwise `~/.config/moviedeck/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set and no
/// directory was given.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_with(dir.map(PathBuf::as_path), |key| {
        std::env::var_os(key).map(PathBuf::from)
    })
}

fn resolve_with(dir: Option<&Path>, env: impl Fn(&str) -> Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }
    let base = match env("XDG_CONFIG_HOME").filter(|p| p.is_absolute()) {
        Some(xdg) => xdg,
        None => match env("HOME") {
            Some(home) => home.join(".config"),
            None => bail!("cannot locate config directory: HOME is not set (use --dir)"),
        },
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}
