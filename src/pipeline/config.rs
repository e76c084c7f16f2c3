// Application configuration, read once at startup from a JSON file.
//
// {
//   "collection_folder": "audioset",
//   "default_album_folder": "rain",
//   "default_channel_volume": 20,
//   "auto_play": false,
//   "labels": { "play": "Play", "pause": "Pause", "unpause": "UnPause", "stop": "Stop" }
// }
//
// Only `collection_folder` is required. Keys we don't know (icon paths from
// older configs, for instance) are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::MAX_POSITION;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("default_channel_volume must be 0-100, got {0}")]
    VolumeOutOfRange(u32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonLabels {
    pub play: String,
    pub pause: String,
    pub unpause: String,
    pub stop: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            play: "Play".into(),
            pause: "Pause".into(),
            unpause: "UnPause".into(),
            stop: "Stop".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub collection_folder: PathBuf,
    #[serde(default)]
    pub default_album_folder: Option<String>,
    #[serde(default = "default_channel_volume")]
    pub default_channel_volume: u32,
    #[serde(default)]
    pub auto_play: bool,
    #[serde(default)]
    pub labels: ButtonLabels,
}

fn default_channel_volume() -> u32 {
    20
}

impl AppConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.default_channel_volume > MAX_POSITION as u32 {
            return Err(ConfigError::VolumeOutOfRange(config.default_channel_volume));
        }
        Ok(config)
    }

    // starting slider position; range was checked on load
    pub fn default_position(&self) -> u8 {
        self.default_channel_volume.min(MAX_POSITION as u32) as u8
    }

    // A relative collection folder is taken relative to the config file
    fn resolve_collection(mut self, config_path: &Path) -> Self {
        if self.collection_folder.is_relative() {
            if let Some(parent) = config_path.parent() {
                self.collection_folder = parent.join(&self.collection_folder);
            }
        }
        self
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    log::info!("load_config: loading from {}", path.display());
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = AppConfig::from_json(path, &json)?.resolve_collection(path);
    log::info!(
        "load_config: collection {}, default album {:?}, volume {}, auto play {}",
        config.collection_folder.display(),
        config.default_album_folder,
        config.default_channel_volume,
        config.auto_play
    );
    Ok(config)
}
