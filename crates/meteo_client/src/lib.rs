//! Météo-Concept API client.
//!
//! Thin wrapper over the two endpoints the panel needs: municipality
//! search and the daily forecast. All calls are authenticated with the
//! account token passed as a query parameter.

pub mod mock;

pub use mock::MockSource;

use std::time::Duration;

use async_trait::async_trait;
use common::{CitySearchResponse, Error, ForecastResponse, Result};
use tracing::debug;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.meteo-concept.com/api";

/// Somewhere forecasts come from. Implemented by the live HTTP client
/// and by the fixture-backed [`MockSource`].
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Look up municipalities by (partial) name.
    async fn search_city(&self, name: &str, token: &str) -> Result<CitySearchResponse>;

    /// Fetch the daily forecast for one INSEE code.
    async fn daily_forecast(&self, insee: u32, token: &str) -> Result<ForecastResponse>;
}

/// HTTP client for the Météo-Concept REST API.
pub struct MeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl MeteoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client pointed at an alternate root, for tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("meteo-panel/0.1")
            .timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Http(format!("{context}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::Http(format!("decoding {context}: {e}")))
    }
}

#[async_trait]
impl WeatherSource for MeteoClient {
    async fn search_city(&self, name: &str, token: &str) -> Result<CitySearchResponse> {
        debug!(city = %name, "searching municipality");
        self.get_json(
            "/location/cities",
            &[("search", name), ("token", token)],
            "city search",
        )
        .await
    }

    async fn daily_forecast(&self, insee: u32, token: &str) -> Result<ForecastResponse> {
        debug!(insee, "fetching daily forecast");
        let insee_s = insee.to_string();
        self.get_json(
            "/forecast/daily",
            &[("token", token), ("insee", insee_s.as_str())],
            "daily forecast",
        )
        .await
    }
}
