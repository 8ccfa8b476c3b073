//! Fixture-backed source for offline development.
//!
//! Serves canned payloads shaped exactly like the live API, so the
//! rest of the pipeline runs unchanged without an account token.

use async_trait::async_trait;
use common::{CitySearchResponse, ForecastResponse, Result};
use tracing::debug;

use crate::WeatherSource;

const MOCK_CITIES: &str = include_str!("../fixtures/mock_cities.json");
const MOCK_METEO: &str = include_str!("../fixtures/mock_meteo.json");

/// Serves the bundled fixtures regardless of what is asked for.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSource;

impl MockSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WeatherSource for MockSource {
    async fn search_city(&self, name: &str, _token: &str) -> Result<CitySearchResponse> {
        debug!(city = %name, "serving mock city search");
        Ok(serde_json::from_str(MOCK_CITIES)?)
    }

    async fn daily_forecast(&self, insee: u32, _token: &str) -> Result<ForecastResponse> {
        debug!(insee, "serving mock forecast");
        Ok(serde_json::from_str(MOCK_METEO)?)
    }
}
