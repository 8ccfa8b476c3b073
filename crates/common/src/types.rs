//! Domain types shared across the panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Météo-Concept wire types ──────────────────────────────────────────

/// A municipality as returned by `GET /location/cities`.
///
/// INSEE codes are strings on the wire: Corsican communes carry codes
/// like `2A004` that do not parse as integers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub insee: String,
    pub name: String,
    /// Postal code ("code postal").
    #[serde(default)]
    pub cp: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Altitude in metres.
    #[serde(default)]
    pub altitude: i32,
}

/// Payload of the city search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitySearchResponse {
    #[serde(default)]
    pub cities: Vec<City>,
}

/// One day of the daily forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    /// Météo-Concept weather code (0 = sunny, 10x = thunderstorms, …).
    pub weather: u16,
    pub tmax: f64,
    pub tmin: f64,
    /// Day offset from today (0 = today).
    #[serde(default)]
    pub day: u8,
    #[serde(default)]
    pub datetime: Option<String>,
    /// Rain probability in percent.
    #[serde(default)]
    pub probarain: Option<u8>,
    #[serde(default)]
    pub sun_hours: Option<f64>,
    /// Cumulated rain over the day, millimetres.
    #[serde(default)]
    pub rr10: Option<f64>,
    /// Mean wind speed at 10 m, km/h.
    #[serde(default)]
    pub wind10m: Option<f64>,
    #[serde(default)]
    pub gust10m: Option<f64>,
}

/// Payload of the daily forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub city: City,
    /// When the forecast was issued by the upstream model.
    #[serde(default)]
    pub update: Option<String>,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

impl ForecastResponse {
    /// Today's entry (day 0), which drives the panel.
    pub fn today(&self) -> Option<&DailyForecast> {
        self.forecast.first()
    }
}

// ── Normalized output ─────────────────────────────────────────────────

/// Where a report came from on a given cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    Live,
    Cache,
    Mock,
}

impl ForecastSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastSource::Live => "live",
            ForecastSource::Cache => "cache",
            ForecastSource::Mock => "mock",
        }
    }
}

/// Normalized result of one fetch cycle, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub weather_code: u16,
    pub tmax: f64,
    pub tmin: f64,
    /// The municipality the forecast is for, as reported upstream.
    pub location: City,
    /// Canonical INSEE code used (or adopted from cache) for this cycle.
    pub insee: String,
    /// City name from the configuration, kept for display.
    pub display_name: Option<String>,
    pub probarain: Option<u8>,
    /// Upstream forecast issue time, verbatim.
    pub update: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub source: ForecastSource,
}

impl ForecastReport {
    /// Name shown in the panel header: configured name first, else the
    /// name the API reported.
    pub fn city_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.location.name)
    }
}
