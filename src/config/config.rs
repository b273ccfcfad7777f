use std::env;
use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants::{API_URL_ENV, CONFIG_FILE, DEFAULT_API_URL, DEFAULT_REVEAL_DELAY_MS};
use crate::error::{SpinwheelError, SpinwheelResult};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub reveal_delay_ms: Option<u64>,
}

impl Config {
    /// Base URL with any trailing slash removed, so endpoint paths can be appended directly.
    pub fn api_url(&self) -> String {
        env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn reveal_delay_ms(&self) -> u64 {
        self.reveal_delay_ms.unwrap_or(DEFAULT_REVEAL_DELAY_MS)
    }
}

pub fn config_path() -> SpinwheelResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE))
        .ok_or_else(|| SpinwheelError::Config("Could not find home directory".to_string()))
}

pub fn load_config() -> Config {
    let Ok(config_path) = config_path() else {
        return Config::default();
    };

    if config_path.exists() {
        fs::read_to_string(&config_path)
            .ok()
            .and_then(|config_str| serde_json::from_str(&config_str).ok())
            .unwrap_or_default()
    } else {
        Config::default()
    }
}

pub fn save_config(config: &Config) -> SpinwheelResult<()> {
    let config_path = config_path()?;

    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;

    Ok(())
}
