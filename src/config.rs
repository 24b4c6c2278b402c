use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{KanbanError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub default_board: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| KanbanError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| KanbanError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "kanban")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(KanbanError::NoConfigDir)
    }

    /// Get API base URL with env var taking precedence over config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var("KANBAN_API_URL") {
            return url;
        }

        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
