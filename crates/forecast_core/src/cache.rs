//! Session-scoped forecast cache with a shared staleness clock.
//!
//! Two fixed slots (one location, one forecast) plus a single shared
//! timestamp. Saving a forecast restarts the clock; saving a location
//! does not, so validity always tracks the age of the forecast data.
//! Capacity is one entry per slot, last write wins, nothing is ever
//! explicitly deleted.

use std::sync::Arc;

use chrono::Utc;
use common::{City, CitySearchResponse, ForecastResponse, Result};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Slot key for the most recent city search result.
pub const LOCATION_KEY: &str = "meteo.location";
/// Slot key for the most recent forecast payload.
pub const FORECAST_KEY: &str = "meteo.forecast";
/// Key for the shared last-fetch timestamp, epoch milliseconds.
pub const STAMP_KEY: &str = "meteo.last_fetch";

/// How long cached data stays servable.
pub const VALIDITY_MS: i64 = 3_600_000;

/// Session-scoped string storage. Swappable so tests can inspect and
/// seed slots directly.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

/// Default in-process backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// The two-slot weather cache.
#[derive(Clone)]
pub struct WeatherCache {
    store: Arc<dyn SessionStore>,
}

impl WeatherCache {
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// True while the shared timestamp exists and is under an hour old.
    /// A stamp from the future reads as stale.
    pub fn is_valid(&self) -> bool {
        match self
            .store
            .get(STAMP_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
        {
            Some(stamp) => (0..VALIDITY_MS).contains(&(Utc::now().timestamp_millis() - stamp)),
            None => false,
        }
    }

    /// Store the raw result of a fresh city search. Leaves the
    /// staleness clock alone.
    pub fn save_location(&self, result: &CitySearchResponse) -> Result<()> {
        self.save(LOCATION_KEY, result)
    }

    /// Store a forecast payload and restart the staleness clock.
    pub fn save_forecast(&self, payload: &ForecastResponse) -> Result<()> {
        self.save(FORECAST_KEY, payload)
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_string(value)?);
        // The clock tracks forecast freshness only.
        if key != LOCATION_KEY {
            self.store
                .set(STAMP_KEY, Utc::now().timestamp_millis().to_string());
        }
        Ok(())
    }

    /// Both slots, or nothing. The cached municipality is the first
    /// hit of the stored search result.
    pub fn load(&self) -> Option<(City, ForecastResponse)> {
        let location: CitySearchResponse = self.read_slot(LOCATION_KEY)?;
        let forecast: ForecastResponse = self.read_slot(FORECAST_KEY)?;
        let city = location.cities.into_iter().next()?;
        Some((city, forecast))
    }

    fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cache slot");
                None
            }
        }
    }
}
