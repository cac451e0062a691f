//! Daemon configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Static daemon configuration, deserialized from a TOML file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The sysfs-style node through which the display controller's AOD
    /// override is toggled
    #[serde(default = "default_control_file")]
    pub control_file: PathBuf,

    /// The TOML file holding the user's AOD preference
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            control_file: default_control_file(),
            settings_file: default_settings_file(),
        }
    }
}

fn default_control_file() -> PathBuf {
    PathBuf::from("/sys/class/graphics/fb0/aod_mode")
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("/etc/vigilia/settings.toml")
}

/// Loads the configuration from the given path. A missing file means
/// defaults.
pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::info!(
            "No configuration file at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("couldn't read configuration file {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("couldn't parse configuration file {}", path.display()))
}
