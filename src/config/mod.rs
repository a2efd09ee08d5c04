// SPDX-License-Identifier: MPL-2.0
//! This module handles the tag mapping file: which media file belongs to which
//! RFID tag code, how long the display may stay idle, and which image greets
//! visitors.
//!
//! The file is a flat JSON object:
//!
//! ```json
//! {
//!   "rfid_mappings": { "0012345678": "lighthouse.jpg" },
//!   "inactivity_timeout": 30,
//!   "welcome_image": "welcome.jpg"
//! }
//! ```
//!
//! Any field may be omitted and is then defaulted. A missing file is a fatal
//! startup error: the display has nothing to show until tags are calibrated.
//!
//! # Examples
//!
//! ```no_run
//! use rfid_display::config;
//! use std::path::Path;
//!
//! let mut config = config::load_from_path(Path::new("config.json")).expect("calibrate first");
//! config.map_tag("0012345678", "lighthouse.jpg");
//! config::save_to_path(&config, Path::new("config.json")).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Tag code to media filename (relative to the media directory).
    #[serde(default)]
    pub rfid_mappings: BTreeMap<String, String>,

    /// Idle seconds before returning to the welcome image. `0` disables it.
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout: u64,

    /// Welcome image filename (relative to the media directory).
    #[serde(default = "default_welcome_image")]
    pub welcome_image: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rfid_mappings: BTreeMap::new(),
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT_SECS,
            welcome_image: DEFAULT_WELCOME_IMAGE.to_string(),
        }
    }
}

impl Config {
    /// Returns the media filename mapped to `code`, if any.
    pub fn media_for(&self, code: &str) -> Option<&str> {
        self.rfid_mappings.get(code).map(String::as_str)
    }

    /// Maps `code` to `filename`, returning the file it was mapped to before.
    pub fn map_tag(&mut self, code: impl Into<String>, filename: impl Into<String>) -> Option<String> {
        self.rfid_mappings.insert(code.into(), filename.into())
    }

    /// Idle period before the welcome image returns, `None` when disabled.
    pub fn inactivity_timeout(&self) -> Option<Duration> {
        (self.inactivity_timeout > 0).then(|| Duration::from_secs(self.inactivity_timeout))
    }
}

fn default_inactivity_timeout() -> u64 {
    DEFAULT_INACTIVITY_TIMEOUT_SECS
}

fn default_welcome_image() -> String {
    DEFAULT_WELCOME_IMAGE.to_string()
}

/// Loads the mapping file.
///
/// # Errors
///
/// - [`Error::ConfigMissing`] when the file does not exist
/// - [`Error::Config`] when it is not a valid mapping object
/// - [`Error::Io`] when it cannot be read
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::ConfigMissing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Saves the mapping file as indented JSON, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
