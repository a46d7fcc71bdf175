use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::lesson::Timing;
use crate::store::file_store::default_data_dir;

const MAX_DELAY_MS: u64 = 5000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_shake_ms")]
    pub shake_ms: u64,
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_theme() -> String {
    "sunny".to_string()
}
fn default_advance_delay_ms() -> u64 {
    800
}
fn default_shake_ms() -> u64 {
    500
}
fn default_feedback_ms() -> u64 {
    2500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            advance_delay_ms: default_advance_delay_ms(),
            shake_ms: default_shake_ms(),
            feedback_ms: default_feedback_ms(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Like [`Config::load_from`], but a broken file yields the defaults. The
    /// error is handed back so it can be logged once logging is up.
    pub fn load_or_default_from(path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyquest")
            .join("config.toml")
    }

    pub fn validate(&mut self) {
        self.advance_delay_ms = self.advance_delay_ms.min(MAX_DELAY_MS);
        self.shake_ms = self.shake_ms.min(MAX_DELAY_MS);
        self.feedback_ms = self.feedback_ms.min(MAX_DELAY_MS);
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn timing(&self) -> Timing {
        Timing {
            advance: Duration::from_millis(self.advance_delay_ms),
            shake: Duration::from_millis(self.shake_ms),
            feedback: Duration::from_millis(self.feedback_ms),
        }
    }
}
