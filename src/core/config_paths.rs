//! Config file location helpers.
//!
//! Looks in:
//! - `$XDG_CONFIG_HOME/gitpersona/`
//! - `$HOME/.config/gitpersona/` when `XDG_CONFIG_HOME` is unset

use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "gitpersona";
pub const PRIMARY_FILE_NAME: &str = "profiles.yaml";
pub const ALTERNATE_FILE_NAMES: [&str; 2] = ["profiles.yml", "config.yaml"];

/// Directory the config file lives in, if a home can be determined
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn config_dir_from(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = match xdg_config_home {
        Some(dir) if dir.is_absolute() => dir,
        _ => home?.join(".config"),
    };
    Some(base.join(CONFIG_DIR_NAME))
}

/// Where a new config file would be written
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(PRIMARY_FILE_NAME))
}

pub fn resolve_config_file_in_dir(dir: &Path) -> Option<PathBuf> {
    let primary = dir.join(PRIMARY_FILE_NAME);
    if primary.exists() {
        return Some(primary);
    }

    for alternate in ALTERNATE_FILE_NAMES {
        let path = dir.join(alternate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Existing config file in the default location, if any
pub fn resolve_config_path() -> Option<PathBuf> {
    config_dir().and_then(|dir| resolve_config_file_in_dir(&dir))
}
