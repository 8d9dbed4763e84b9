// src/config.rs
// Immutable dashboard configuration, injected into each controller at
// construction. Loads JSON or TOML; falls back to the baked-in seed.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const ENV_API_KEY: &str = "NASA_API_KEY";

/// NASA's public demo key; rate-limited but always valid.
const DEFAULT_API_KEY: &str = "DEMO_KEY";

fn default_refresh_ms() -> u64 {
    3_600_000 // hourly
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// EPIC natural-image metadata base URL.
    pub epic: String,
    /// EPIC archive base URL; image-resource URLs are built from this
    /// plus `YYYY/MM/DD` date components and the image identifier.
    pub epic_archive: String,
    /// DONKI solar-flare (FLR) base URL.
    pub solar_flares: String,
}

/// Per-feed refresh cadence in milliseconds. The rotation cadence is a
/// crate constant and deliberately not configurable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRates {
    #[serde(default = "default_refresh_ms")]
    pub imagery_ms: u64,
    #[serde(default = "default_refresh_ms")]
    pub solar_ms: u64,
}

impl Default for RefreshRates {
    fn default() -> Self {
        Self {
            imagery_ms: default_refresh_ms(),
            solar_ms: default_refresh_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Resolved at load time: `NASA_API_KEY` env var wins, then the
    /// configured value, then the demo key.
    #[serde(default)]
    pub api_key: String,
    pub endpoints: Endpoints,
    #[serde(default)]
    pub refresh: RefreshRates,
}

impl DashboardConfig {
    /// Built-in configuration pointing at the public NASA API.
    pub fn default_seed() -> Self {
        Self {
            api_key: String::new(),
            endpoints: Endpoints {
                epic: "https://api.nasa.gov/EPIC/api/natural".to_string(),
                epic_archive: "https://api.nasa.gov/EPIC/archive/natural".to_string(),
                solar_flares: "https://api.nasa.gov/DONKI/FLR".to_string(),
            },
            refresh: RefreshRates::default(),
        }
        .finalize()
    }

    /// Load configuration from an explicit path. Supports TOML or JSON.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Ok(parse_config(&content, ext.as_str())?.finalize())
    }

    /// Resolve the api key and sanitize interval values.
    fn finalize(mut self) -> Self {
        if let Ok(key) = env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }
        if self.api_key.trim().is_empty() {
            self.api_key = DEFAULT_API_KEY.to_string();
        }
        if self.refresh.imagery_ms == 0 {
            self.refresh.imagery_ms = default_refresh_ms();
        }
        if self.refresh.solar_ms == 0 {
            self.refresh.solar_ms = default_refresh_ms();
        }
        self
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<DashboardConfig> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("[endpoints]");
    if try_toml {
        if let Ok(v) = toml::from_str::<DashboardConfig>(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = serde_json::from_str::<DashboardConfig>(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = toml::from_str::<DashboardConfig>(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported dashboard config format"))
}
