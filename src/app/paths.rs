// SPDX-License-Identifier: MPL-2.0
//! Path resolution for the mapping file and the media directory.
//!
//! # Resolution Order
//!
//! 1. **CLI arguments** (`--config`, `--media-dir`)
//! 2. **Environment variables** (`RFID_DISPLAY_CONFIG`, `RFID_DISPLAY_MEDIA_DIR`)
//! 3. **Defaults** relative to the working directory (`config.json`, `data/images`)
//!
//! Kiosks are usually launched from their install directory, so the defaults
//! are deliberately relative rather than platform config directories.

use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_MEDIA_DIR};
use std::path::PathBuf;

/// Environment variable to override the mapping file location.
pub const ENV_CONFIG_FILE: &str = "RFID_DISPLAY_CONFIG";

/// Environment variable to override the media directory.
pub const ENV_MEDIA_DIR: &str = "RFID_DISPLAY_MEDIA_DIR";

/// Returns the mapping file path.
pub fn config_file(cli_override: Option<PathBuf>) -> PathBuf {
    resolve(cli_override, ENV_CONFIG_FILE, DEFAULT_CONFIG_FILE)
}

/// Returns the media directory path.
pub fn media_dir(cli_override: Option<PathBuf>) -> PathBuf {
    resolve(cli_override, ENV_MEDIA_DIR, DEFAULT_MEDIA_DIR)
}

fn resolve(cli_override: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    if let Some(path) = cli_override {
        return path;
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }

    PathBuf::from(default)
}
