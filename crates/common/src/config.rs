//! Panel configuration.

use serde::{Deserialize, Serialize};

/// Minimum length of a plausible Météo-Concept API token.
pub const MIN_API_KEY_LEN: usize = 35;

/// A configured location code, before validation.
///
/// TOML and environment sources may carry the INSEE code either as an
/// integer or as a string. A string that does not parse as a number is
/// kept as-is so the resolver can fall back to a name search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LocationCode {
    Number(i64),
    Text(String),
}

impl LocationCode {
    /// Numeric INSEE code, when the configured value is usable as one.
    pub fn as_insee(&self) -> Option<u32> {
        match self {
            LocationCode::Number(n) => u32::try_from(*n).ok(),
            LocationCode::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }

    /// The raw configured value, as a string.
    pub fn raw(&self) -> String {
        match self {
            LocationCode::Number(n) => n.to_string(),
            LocationCode::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for LocationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationCode::Number(n) => write!(f, "{n}"),
            LocationCode::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Runtime settings for a fetch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// City name used for lookups and as the displayed label.
    #[serde(default)]
    pub city: Option<String>,
    /// INSEE code of the municipality; skips the name search when valid.
    #[serde(default)]
    pub insee_code: Option<LocationCode>,
    /// Météo-Concept API token.
    #[serde(default)]
    pub api_key: String,
    /// Serve fixtures instead of calling the API.
    #[serde(default)]
    pub use_mock: bool,
    /// Reuse forecasts fetched less than an hour ago.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    /// Seconds between refresh cycles.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_use_cache() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    60
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            city: None,
            insee_code: None,
            api_key: String::new(),
            use_mock: false,
            use_cache: default_use_cache(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl PanelConfig {
    /// Whether the API token looks usable for live calls.
    pub fn has_plausible_key(&self) -> bool {
        self.api_key.len() >= MIN_API_KEY_LEN
    }
}
