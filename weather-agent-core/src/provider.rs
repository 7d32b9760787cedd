use crate::{
    Config, QueryOrchestrator,
    error::{GeocodeError, WeatherError},
    model::{Coordinates, LocationQuery, WeatherSnapshot},
    provider::{geocoder::OpenWeatherGeocoder, weather::OpenWeatherCurrent},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod geocoder;
pub mod weather;

/// Resolves a place description to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, GeocodeError>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, WeatherError>;
}

/// Build the OpenWeather-backed pipeline from config.
///
/// Both providers share one HTTP client and the same API key.
pub fn orchestrator_from_config(config: &Config) -> anyhow::Result<QueryOrchestrator> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: set API_KEY or run `weather-agent configure` and enter your OpenWeather key."
        )
    })?;

    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    let geocoder = OpenWeatherGeocoder::with_endpoint(
        api_key.to_owned(),
        config.endpoints.geocoding_url.clone(),
        http.clone(),
    );
    let fetcher = OpenWeatherCurrent::with_endpoint(
        api_key.to_owned(),
        config.endpoints.weather_url.clone(),
        http,
    );

    Ok(QueryOrchestrator::new(Arc::new(geocoder), Arc::new(fetcher)))
}

/// Keep provider error bodies short enough for a log line.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orchestrator_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = orchestrator_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn orchestrator_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.timeout_secs = Some(5);

        assert!(orchestrator_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));

        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let short = truncate_body(&long);
        assert_eq!(short.chars().count(), 203);
    }
}
