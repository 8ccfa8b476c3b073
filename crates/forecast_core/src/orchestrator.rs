//! Top-level fetch policy.
//!
//! One `run` per cycle: load configuration, resolve the municipality,
//! then serve the forecast from fixtures, the session cache, or the
//! live API. Single attempt, no retries; recovery is the scheduler's
//! problem.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{City, Error, ForecastReport, ForecastResponse, ForecastSource, PanelConfig, Result};
use meteo_client::WeatherSource;
use tracing::{debug, info};

use crate::cache::WeatherCache;
use crate::resolver::LocationResolver;

/// Supplies the run configuration at the start of every cycle.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn load(&self) -> Result<PanelConfig>;
}

pub struct ForecastOrchestrator {
    config: Arc<dyn ConfigProvider>,
    live: Arc<dyn WeatherSource>,
    mock: Arc<dyn WeatherSource>,
    cache: WeatherCache,
    resolver: LocationResolver,
}

impl ForecastOrchestrator {
    pub fn new(
        config: Arc<dyn ConfigProvider>,
        live: Arc<dyn WeatherSource>,
        mock: Arc<dyn WeatherSource>,
        cache: WeatherCache,
    ) -> Self {
        Self {
            config,
            live,
            mock,
            cache,
            resolver: LocationResolver::new(),
        }
    }

    /// One full fetch cycle.
    pub async fn run(&self) -> Result<ForecastReport> {
        // 1. Fresh configuration every cycle.
        let cfg = self.config.load().await?;
        if !cfg.use_mock && !cfg.has_plausible_key() {
            return Err(Error::Config("API key missing or too short".into()));
        }

        let source: &dyn WeatherSource = if cfg.use_mock {
            self.mock.as_ref()
        } else {
            self.live.as_ref()
        };

        // 2. Resolve the municipality.
        let resolved = self.resolver.resolve(&cfg, source, &self.cache).await?;

        // 3. Mock mode serves the fixture payload; the forecast cache
        //    is neither read nor written.
        if cfg.use_mock {
            debug!("mock mode, serving fixture forecast");
            let payload = source
                .daily_forecast(resolved.insee().unwrap_or_default(), &cfg.api_key)
                .await?;
            return assemble_report(&cfg, &payload, None, resolved.raw_code, ForecastSource::Mock);
        }

        // 4. A fresh-enough cache wins, and its municipality overrides
        //    the one just resolved.
        if cfg.use_cache && self.cache.is_valid() {
            if let Some((city, payload)) = self.cache.load() {
                info!(insee = %city.insee, "serving cached forecast");
                let insee = city.insee.clone();
                return assemble_report(&cfg, &payload, Some(city), insee, ForecastSource::Cache);
            }
        }

        // 5. Live fetch requires a numeric code.
        let insee = resolved
            .insee()
            .ok_or_else(|| Error::Config("invalid or missing INSEE code".into()))?;
        let payload = source.daily_forecast(insee, &cfg.api_key).await?;
        let report = assemble_report(
            &cfg,
            &payload,
            None,
            resolved.raw_code,
            ForecastSource::Live,
        )?;
        self.cache.save_forecast(&payload)?;
        info!(insee, weather = report.weather_code, "fetched live forecast");
        Ok(report)
    }
}

fn assemble_report(
    cfg: &PanelConfig,
    payload: &ForecastResponse,
    cached_city: Option<City>,
    insee: String,
    source: ForecastSource,
) -> Result<ForecastReport> {
    let today = payload
        .today()
        .ok_or_else(|| Error::Other("forecast payload contained no entries".into()))?;
    let location = cached_city.unwrap_or_else(|| payload.city.clone());
    Ok(ForecastReport {
        weather_code: today.weather,
        tmax: today.tmax,
        tmin: today.tmin,
        location,
        insee,
        display_name: cfg.city.clone(),
        probarain: today.probarain,
        update: payload.update.clone(),
        fetched_at: Utc::now(),
        source,
    })
}
