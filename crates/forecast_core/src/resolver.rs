//! Turns a loose location configuration into a canonical INSEE code.
//!
//! Precedence: a usable configured code, then a still-valid cached
//! municipality, then a name search against the API. Search results
//! are persisted so the next session skips the lookup.

use common::{City, Error, PanelConfig, Result};
use meteo_client::WeatherSource;
use tracing::{debug, info};

use crate::cache::WeatherCache;

/// Outcome of location resolution.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    /// Canonical code, as configured or as returned by the search.
    pub raw_code: String,
    /// Municipality details, when the code came from a search or the cache.
    pub city: Option<City>,
}

impl ResolvedLocation {
    /// The code in the form the forecast endpoint requires.
    pub fn insee(&self) -> Option<u32> {
        self.raw_code.trim().parse().ok()
    }
}

#[derive(Debug, Default)]
pub struct LocationResolver;

impl LocationResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(
        &self,
        cfg: &PanelConfig,
        source: &dyn WeatherSource,
        cache: &WeatherCache,
    ) -> Result<ResolvedLocation> {
        // A usable configured code wins outright, nothing to look up.
        if let Some(code) = cfg.insee_code.as_ref() {
            if code.as_insee().is_some() {
                debug!(code = %code, "using configured INSEE code");
                return Ok(ResolvedLocation {
                    raw_code: code.raw(),
                    city: None,
                });
            }
        }

        // A still-valid cache already knows the municipality.
        if cfg.use_cache && cache.is_valid() {
            if let Some((city, _)) = cache.load() {
                debug!(insee = %city.insee, city = %city.name, "using cached location");
                return Ok(ResolvedLocation {
                    raw_code: city.insee.clone(),
                    city: Some(city),
                });
            }
        }

        // Fixture-backed searches ignore the name, so only live
        // lookups validate it.
        let name = cfg.city.as_deref().unwrap_or("");
        if !cfg.use_mock && name.chars().count() <= 1 {
            return Err(Error::InvalidInput("city name missing or too short".into()));
        }

        let found = source.search_city(name, &cfg.api_key).await?;
        let Some(first) = found.cities.first().cloned() else {
            return Err(Error::CityNotFound(name.to_string()));
        };

        info!(city = %first.name, insee = %first.insee, "resolved municipality by name");
        cache.save_location(&found)?;

        Ok(ResolvedLocation {
            raw_code: first.insee.clone(),
            city: Some(first),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use common::config::LocationCode;
    use common::{CitySearchResponse, ForecastResponse};

    use super::*;
    use crate::cache::{MemoryStore, SessionStore, LOCATION_KEY, STAMP_KEY};

    struct CountingSource {
        cities: Vec<City>,
        search_calls: AtomicUsize,
    }

    impl CountingSource {
        fn with_cities(cities: Vec<City>) -> Self {
            Self {
                cities,
                search_calls: AtomicUsize::new(0),
            }
        }

        fn searches(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherSource for CountingSource {
        async fn search_city(&self, _name: &str, _token: &str) -> Result<CitySearchResponse> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(CitySearchResponse {
                cities: self.cities.clone(),
            })
        }

        async fn daily_forecast(&self, _insee: u32, _token: &str) -> Result<ForecastResponse> {
            Err(Error::Other("daily_forecast not scripted".into()))
        }
    }

    fn make_city(insee: &str, name: &str) -> City {
        City {
            insee: insee.into(),
            name: name.into(),
            cp: 0,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0,
        }
    }

    fn name_config(city: &str) -> PanelConfig {
        PanelConfig {
            city: Some(city.into()),
            api_key: "x".repeat(35),
            ..PanelConfig::default()
        }
    }

    #[tokio::test]
    async fn configured_code_never_hits_the_network() {
        let source = CountingSource::with_cities(vec![]);
        let cache = WeatherCache::in_memory();
        let cfg = PanelConfig {
            insee_code: Some(LocationCode::Number(79257)),
            city: Some("Saint-Maxire".into()),
            ..PanelConfig::default()
        };

        let resolved = LocationResolver::new()
            .resolve(&cfg, &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "79257");
        assert_eq!(resolved.insee(), Some(79257));
        assert!(resolved.city.is_none());
        assert_eq!(source.searches(), 0);
    }

    #[tokio::test]
    async fn name_only_config_searches_exactly_once() {
        let source = CountingSource::with_cities(vec![make_city("75056", "Paris")]);
        let cache = WeatherCache::in_memory();

        let resolved = LocationResolver::new()
            .resolve(&name_config("Paris"), &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "75056");
        assert_eq!(resolved.city.as_ref().unwrap().name, "Paris");
        assert_eq!(source.searches(), 1);
    }

    #[tokio::test]
    async fn non_numeric_configured_code_falls_back_to_search() {
        let source = CountingSource::with_cities(vec![make_city("2A004", "Ajaccio")]);
        let cache = WeatherCache::in_memory();
        let cfg = PanelConfig {
            insee_code: Some(LocationCode::Text("not-a-code".into())),
            ..name_config("Ajaccio")
        };

        let resolved = LocationResolver::new()
            .resolve(&cfg, &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "2A004");
        assert_eq!(resolved.insee(), None);
        assert_eq!(source.searches(), 1);
    }

    #[tokio::test]
    async fn short_or_missing_name_is_rejected_before_any_call() {
        let source = CountingSource::with_cities(vec![make_city("75056", "Paris")]);
        let cache = WeatherCache::in_memory();

        let err = LocationResolver::new()
            .resolve(&name_config("P"), &source, &cache)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let cfg = PanelConfig {
            api_key: "x".repeat(35),
            ..PanelConfig::default()
        };
        let err = LocationResolver::new()
            .resolve(&cfg, &source, &cache)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        assert_eq!(source.searches(), 0);
    }

    #[tokio::test]
    async fn mock_mode_skips_the_name_validation() {
        let source = CountingSource::with_cities(vec![make_city("79257", "Saint-Maxire")]);
        let cache = WeatherCache::in_memory();
        let cfg = PanelConfig {
            use_mock: true,
            ..PanelConfig::default()
        };

        // No city configured at all; the fixture search serves anyway.
        let resolved = LocationResolver::new()
            .resolve(&cfg, &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "79257");
        assert_eq!(source.searches(), 1);
    }

    #[tokio::test]
    async fn zero_matches_is_not_found_and_writes_nothing() {
        let source = CountingSource::with_cities(vec![]);
        let store = Arc::new(MemoryStore::new());
        let cache = WeatherCache::with_store(store.clone());

        let err = LocationResolver::new()
            .resolve(&name_config("Nulle-Part"), &source, &cache)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CityNotFound(_)));
        assert!(store.get(LOCATION_KEY).is_none());
    }

    #[tokio::test]
    async fn first_match_wins_and_is_persisted_without_a_stamp() {
        let source = CountingSource::with_cities(vec![
            make_city("79257", "Saint-Maxire"),
            make_city("79191", "Niort"),
        ]);
        let store = Arc::new(MemoryStore::new());
        let cache = WeatherCache::with_store(store.clone());

        let resolved = LocationResolver::new()
            .resolve(&name_config("Saint"), &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "79257");
        assert!(store.get(LOCATION_KEY).unwrap().contains("79191"));
        assert!(store.get(STAMP_KEY).is_none());
    }

    #[tokio::test]
    async fn valid_cache_short_circuits_the_search() {
        let source = CountingSource::with_cities(vec![make_city("75056", "Paris")]);
        let cache = WeatherCache::in_memory();
        cache
            .save_location(&CitySearchResponse {
                cities: vec![make_city("17300", "La Rochelle")],
            })
            .unwrap();
        cache
            .save_forecast(
                &serde_json::from_value(serde_json::json!({
                    "city": {"insee": "17300", "name": "La Rochelle"},
                    "forecast": [{"day": 0, "weather": 1, "tmin": 8.0, "tmax": 15.0}]
                }))
                .unwrap(),
            )
            .unwrap();

        let resolved = LocationResolver::new()
            .resolve(&name_config("Paris"), &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "17300");
        assert_eq!(source.searches(), 0);
    }

    #[tokio::test]
    async fn disabled_cache_is_ignored_even_when_valid() {
        let source = CountingSource::with_cities(vec![make_city("75056", "Paris")]);
        let cache = WeatherCache::in_memory();
        cache
            .save_location(&CitySearchResponse {
                cities: vec![make_city("17300", "La Rochelle")],
            })
            .unwrap();
        cache
            .save_forecast(
                &serde_json::from_value(serde_json::json!({
                    "city": {"insee": "17300", "name": "La Rochelle"},
                    "forecast": [{"day": 0, "weather": 1, "tmin": 8.0, "tmax": 15.0}]
                }))
                .unwrap(),
            )
            .unwrap();

        let cfg = PanelConfig {
            use_cache: false,
            ..name_config("Paris")
        };
        let resolved = LocationResolver::new()
            .resolve(&cfg, &source, &cache)
            .await
            .unwrap();

        assert_eq!(resolved.raw_code, "75056");
        assert_eq!(source.searches(), 1);
    }
}
