//! Configuration persistence for placeshare settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{GeoBounds, SurfaceSize};

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceShareConfig {
    /// Viewport shown on the map
    pub map_bounds: GeoBounds,
    /// Surface size assumed until the UI reports one
    pub surface_size: SurfaceSize,
    /// Simulated geocoding latency in milliseconds
    #[serde(default = "default_lookup_latency_ms")]
    pub lookup_latency_ms: u64,
    /// Drags smaller than this many pixels on both axes are ignored (0 = never)
    #[serde(default)]
    pub min_drag_px: f64,
    /// Origin used when building share links
    #[serde(default = "default_share_origin")]
    pub share_origin: String,
    /// Author recorded for places added without one
    #[serde(default)]
    pub default_author: Option<String>,
}

fn default_lookup_latency_ms() -> u64 {
    500
}

fn default_share_origin() -> String {
    "http://localhost:3000".to_string()
}

impl PlaceShareConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "placeshare";

    pub fn lookup_latency(&self) -> Duration {
        Duration::from_millis(self.lookup_latency_ms)
    }

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from the platform config dir
    ///
    /// A missing or unreadable file falls back to defaults; a file whose
    /// values cannot drive the map is an error.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Ok(Self::default());
        };
        Self::load_or_init(&path)
    }

    /// Load `path`, writing defaults there first if it does not exist
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Writing default config to {}", path.display());
            let config = Self::default();
            if let Err(err) = config.save_to(path) {
                log::error!("Failed to save config: {err:#}");
            }
            return Ok(config);
        }
        let config = match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:#}");
                return Ok(Self::default());
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Reject bounds or sizes the mapper cannot work with
    pub fn validate(&self) -> Result<()> {
        self.map_bounds
            .validate()
            .context("Config contains unusable map bounds")?;
        self.surface_size
            .validate()
            .context("Config contains an empty surface size")?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

impl Default for PlaceShareConfig {
    fn default() -> Self {
        Self {
            map_bounds: GeoBounds::hongdae(),
            surface_size: SurfaceSize::new(800.0, 600.0),
            lookup_latency_ms: default_lookup_latency_ms(),
            // No threshold: a click selects a point region
            min_drag_px: 0.0,
            share_origin: default_share_origin(),
            default_author: None,
        }
    }
}
