//! Configuration for the front desk briefing
//!
//! Stored at `~/.frontdesk/config.json`. Every field has a default, so a
//! missing file simply means "use the house defaults".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;
use crate::prepare::constants::{
    DEFAULT_SERVICE_DATE, ESTABLISHMENT_NAME, VIP_RATING_THRESHOLD, VIP_REVIEW_COUNT,
};
use crate::services::dashboard::StatsPolicy;

fn default_dataset_path() -> String {
    "data/fine-dining-dataset.json".to_string()
}

fn default_establishment_name() -> String {
    ESTABLISHMENT_NAME.to_string()
}

fn default_date() -> String {
    DEFAULT_SERVICE_DATE.to_string()
}

fn default_vip_rating_threshold() -> f64 {
    VIP_RATING_THRESHOLD
}

fn default_vip_review_count() -> usize {
    VIP_REVIEW_COUNT
}

/// Configuration stored in ~/.frontdesk/config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    #[serde(default = "default_establishment_name")]
    pub establishment_name: String,
    #[serde(default = "default_date")]
    pub default_date: String,
    #[serde(default = "default_vip_rating_threshold")]
    pub vip_rating_threshold: f64,
    #[serde(default = "default_vip_review_count")]
    pub vip_review_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            establishment_name: default_establishment_name(),
            default_date: default_date(),
            vip_rating_threshold: default_vip_rating_threshold(),
            vip_review_count: default_vip_review_count(),
        }
    }
}

impl Config {
    pub fn stats_policy(&self) -> StatsPolicy {
        StatsPolicy {
            establishment_name: self.establishment_name.clone(),
            vip_rating_threshold: self.vip_rating_threshold,
            vip_review_count: self.vip_review_count,
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(&self.dataset_path)
    }
}

/// Path of the per-user config file
pub fn config_path() -> Result<PathBuf, DataLoadError> {
    let home = dirs::home_dir()
        .ok_or_else(|| DataLoadError::Config("Could not find home directory".to_string()))?;
    Ok(home.join(".frontdesk").join("config.json"))
}

/// Load configuration from ~/.frontdesk/config.json
pub fn load_config() -> Result<Config, DataLoadError> {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(e) => {
            log::warn!("{}; using default configuration", e);
            Ok(Config::default())
        }
    }
}

/// Load configuration from an explicit path. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, DataLoadError> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| DataLoadError::Config(format!("Failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| DataLoadError::Config(format!("Failed to parse config: {}", e)))
}
