use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::info;
use serde_derive::Deserialize;
use thiserror::Error;

/// Bundled template copied into place on first run.
const CONFIG_TEMPLATE: &str = include_str!("../config_example.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("sleep_time_in_s must be a positive number of seconds, got {0}")]
    NonPositiveInterval(i64),
}

/// On-disk shape of the config file. `devices` stays a single
/// comma-separated string, matching what blueutil users paste in.
#[derive(Deserialize, Debug)]
struct RawConfig {
    devices: String,
    display_name: String,
    sleep_time_in_s: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub devices: Vec<String>,
    pub display_name: String,
    pub poll_interval: Duration,
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        ConfigStore { path }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".accessory-switcher")
            .join("config.toml")
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the config, bootstrapping the file from the
    /// bundled template if this is the first run.
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.bootstrap()?;

        let contents = fs::read_to_string(&self.path)?;
        let raw: RawConfig = toml::de::from_str(&contents)?;

        if raw.sleep_time_in_s <= 0 {
            return Err(ConfigError::NonPositiveInterval(raw.sleep_time_in_s));
        }

        // Split is strict: ids reach blueutil exactly as written, so any
        // whitespace after a comma belongs to the id.
        let devices = raw.devices.split(',').map(str::to_string).collect();

        info!("Config file loaded");

        Ok(Config {
            devices,
            display_name: raw.display_name,
            poll_interval: Duration::from_secs(raw.sleep_time_in_s as u64),
        })
    }

    /// Staleness token used for change detection.
    pub fn modified(&self) -> io::Result<SystemTime> {
        fs::metadata(&self.path)?.modified()
    }

    /// True on any difference, earlier or later. Mtime only: a rewrite
    /// with identical bytes still reloads, and a restored mtime masks an
    /// edit. Accepted imprecision.
    pub fn has_changed(&self, last_seen: SystemTime) -> io::Result<bool> {
        Ok(self.modified()? != last_seen)
    }

    fn bootstrap(&self) -> io::Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, CONFIG_TEMPLATE)?;
        info!("Created default config at {}", self.path.display());
        Ok(())
    }
}
