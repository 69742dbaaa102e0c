use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{image::DEFAULT_IMAGE_BASE, model::Location};

pub const DEFAULT_WEATHER_BASE: &str = "https://api.open-meteo.com";
pub const DEFAULT_GEOCODING_BASE: &str = "https://geocoding-api.open-meteo.com";

pub const MAX_SUGGESTIONS: usize = 20;

/// Base URLs of the upstream services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub weather: String,
    pub geocoding: String,
    pub image: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: DEFAULT_WEATHER_BASE.to_string(),
            geocoding: DEFAULT_GEOCODING_BASE.to_string(),
            image: DEFAULT_IMAGE_BASE.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 10
/// suggestion_count = 5
///
/// [[locations]]
/// name = "Ladakh"
/// lat = 34.1526
/// lon = 77.5771
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-request timeout for upstream calls.
    pub timeout_secs: u64,

    /// How many suggestions to ask the geocoder for.
    pub suggestion_count: usize,

    pub endpoints: Endpoints,

    /// Strategic locations shown on every page.
    pub locations: Vec<Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            suggestion_count: 5,
            endpoints: Endpoints::default(),
            locations: default_locations(),
        }
    }
}

pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Ladakh", 34.1526, 77.5771),
        Location::new("Arunachal Pradesh", 28.2180, 94.7278),
        Location::new("Sikkim", 27.3389, 88.6065),
        Location::new("Kashmir", 34.0837, 74.7973),
    ]
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from the default location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-monitor", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        if self.suggestion_count == 0 || self.suggestion_count > MAX_SUGGESTIONS {
            bail!("suggestion_count must be between 1 and {MAX_SUGGESTIONS}");
        }

        for (name, url) in [
            ("weather", &self.endpoints.weather),
            ("geocoding", &self.endpoints.geocoding),
            ("image", &self.endpoints.image),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("endpoints.{name} must be an http(s) URL, got '{url}'");
            }
        }

        Ok(())
    }

    /// Add a preset, replacing any existing one with the same name.
    pub fn upsert_location(&mut self, location: Location) {
        match self.locations.iter_mut().find(|l| l.name == location.name) {
            Some(existing) => *existing = location,
            None => self.locations.push(location),
        }
    }
}
