use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::geometry::CardSize;
use crate::{bflog_debug, Error, Result};

fn default_card_width() -> f64 {
    CardSize::default().width
}

fn default_card_height() -> f64 {
    CardSize::default().height
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    #[serde(default = "default_card_height")]
    pub card_height: f64,
    /// Snapshot used when a command is given no file.
    pub snapshot: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card_width: default_card_width(),
            card_height: default_card_height(),
            snapshot: None,
        }
    }
}

impl Config {
    pub fn blockflow_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".blockflow"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::blockflow_dir()?.join("blockflow.toml"))
    }

    /// Load `~/.blockflow/blockflow.toml`, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        bflog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            bflog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        bflog_debug!(
            "Config loaded: card={}x{}, snapshot={:?}",
            config.card_width,
            config.card_height,
            config.snapshot
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let dir = Self::blockflow_dir()?;
        if !dir.exists() {
            bflog_debug!("Creating blockflow directory: {}", dir.display());
            fs::create_dir_all(&dir)?;
        }
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        fs::write(path, toml::to_string_pretty(self)?)?;
        bflog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("card_width", self.card_width), ("card_height", self.card_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Validation(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn card_size(&self) -> CardSize {
        CardSize::new(self.card_width, self.card_height)
    }

    /// Configured default snapshot path, with `~/` expanded.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.as_deref().map(expand_tilde)
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
