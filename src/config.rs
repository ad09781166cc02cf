use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::ports::music_app::SearchScope;

pub const DEFAULT_APPLICATION: &str = "Music";
pub const DEFAULT_PLAYLIST: &str = "temp-playlist";
pub const DEFAULT_QUERY: &str = "Zoran Dukic Castelnuovo-Tedesco 24 Caprichos de Goya";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scriptable application to drive, e.g. "Music" or "iTunes"
    pub application: String,
    /// User playlist that gets cleared and refilled
    pub playlist: String,
    pub query: String,
    pub search_scope: SearchScope,
    /// Path to `osascript`, looked up on PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osascript: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application: DEFAULT_APPLICATION.to_string(),
            playlist: DEFAULT_PLAYLIST.to_string(),
            query: DEFAULT_QUERY.to_string(),
            search_scope: SearchScope::All,
            osascript: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-refresher").join("config.toml"))
    }

    /// Load the default config file, falling back to built-in defaults when
    /// there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                log::debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to the default location unless a file is
    /// already there. Returns the path.
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_eyre("No config directory on this platform")?;
        Self::default().write_if_missing(&path)?;
        Ok(path)
    }

    /// Returns false when `path` already existed and was left alone.
    pub fn write_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            log::info!("Config already exists at {}", path.display());
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml()?)
            .wrap_err(format!("Failed to write config file: {}", path.display()))?;
        Ok(true)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).wrap_err("Failed to serialize config")
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn osascript_path(&self) -> Option<PathBuf> {
        self.osascript.as_deref().map(|p| self.expand_path(p))
    }
}
