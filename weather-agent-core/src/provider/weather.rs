use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
    provider::truncate_body,
};

use super::WeatherFetcher;

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeather current weather (`/data/2.5/weather`), metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherCurrent {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherCurrent {
    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            api_key,
            endpoint: endpoint.into(),
            http,
        }
    }

    async fn fetch_current(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        parse_current(&body)
    }
}

/// Parse and normalize a current-weather payload.
pub fn parse_current(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    parsed.into_snapshot()
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    visibility: i64,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingField("weather[0]"))?;

        Ok(WeatherSnapshot {
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
            temperature_c: truncate(self.main.temp),
            feels_like_c: truncate(self.main.feels_like),
            temp_max_c: truncate(self.main.temp_max),
            temp_min_c: truncate(self.main.temp_min),
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            wind_speed_mps: truncate(self.wind.speed),
            wind_degree: self.wind.deg,
        })
    }
}

/// Truncate toward zero; `-0.4` becomes `0`, `21.9` becomes `21`.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

#[async_trait]
impl WeatherFetcher for OpenWeatherCurrent {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let result = self.fetch_current(coordinates).await;
        if let Err(err) = &result {
            tracing::warn!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                error = %err,
                "Error in current weather lookup"
            );
        }
        result
    }
}
