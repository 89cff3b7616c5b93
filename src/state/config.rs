//! Configuration management

use crate::platform::detect_locale;
use crate::{Result, SaybackError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locale used when none is configured or detected
pub const DEFAULT_LOCALE: &str = "en-US";

/// Application configuration
///
/// Settings that are not user preferences: where data lives, which locale
/// drives voice selection, and how often the voice list is re-read.
/// Preferences (speed, voice) live in the data store instead.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.sayback.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from ~/.sayback.cfg, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SaybackError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| SaybackError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| SaybackError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.sayback.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sayback.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("app"))
            .set("data_dir", "")
            .set("locale", "")
            .set("voice_poll_secs", "5");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Directory holding history.json and preferences.json
    ///
    /// Empty means the platform data directory (e.g. ~/.local/share/sayback).
    pub fn data_dir(&self) -> PathBuf {
        let configured = self.get_string("app", "data_dir", "");
        let configured = configured.trim();
        if !configured.is_empty() {
            return PathBuf::from(configured);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::APP_NAME)
    }

    /// Locale used to pick the best voice and to name languages
    ///
    /// Empty means detect it from the environment.
    pub fn locale(&self) -> String {
        let configured = self.get_string("app", "locale", "");
        let configured = configured.trim();
        if !configured.is_empty() {
            return configured.replace('_', "-");
        }
        detect_locale().unwrap_or_else(|| DEFAULT_LOCALE.to_string())
    }

    /// How often the native engine re-reads the voice list
    pub fn voice_poll_interval(&self) -> Duration {
        let secs = self.get_int("app", "voice_poll_secs", 5).max(1);
        Duration::from_secs(secs as u64)
    }
}
