//! Configuration loader — merges env vars, .env file, and config.toml.

use std::path::PathBuf;

use async_trait::async_trait;
use common::config::LocationCode;
use common::{Error, PanelConfig, Result};
use forecast_core::ConfigProvider;

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn validate_config(config: &PanelConfig) -> Result<()> {
    let mut issues: Vec<String> = Vec::new();

    if config.refresh_interval_secs == 0 {
        issues.push("refresh_interval_secs must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Reads panel configuration fresh on every cycle.
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load configuration from the TOML file and the environment.
    pub fn load_from_disk(&self) -> Result<PanelConfig> {
        // 1. Load .env file, if any.
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        // 2. Start with defaults.
        let mut config = PanelConfig::default();

        // 3. Merge the config file when present.
        if self.path.exists() {
            let contents = std::fs::read_to_string(&self.path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", self.path.display(), e))
            })?;
            config = toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse {}: {}", self.path.display(), e))
            })?;
        }

        // 4. Override with environment variables (highest priority).
        if let Ok(city) = std::env::var("METEO_CITY") {
            config.city = Some(city);
        }
        if let Ok(code) = std::env::var("METEO_INSEE_CODE") {
            config.insee_code = Some(LocationCode::Text(code));
        }
        if let Ok(key) = std::env::var("METEO_API_KEY") {
            config.api_key = key;
        }
        if let Ok(raw) = std::env::var("METEO_USE_MOCK") {
            config.use_mock = parse_bool(&raw);
        }
        if let Ok(raw) = std::env::var("METEO_USE_CACHE") {
            config.use_cache = parse_bool(&raw);
        }
        if let Ok(raw) = std::env::var("METEO_REFRESH_SECS") {
            config.refresh_interval_secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::Config("METEO_REFRESH_SECS must be an integer > 0".into()))?;
        }

        // 5. Validate.
        validate_config(&config)?;

        Ok(config)
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn load(&self) -> Result<PanelConfig> {
        self.load_from_disk()
    }
}
