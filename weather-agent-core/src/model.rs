use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A free-text place description, exactly as the caller sent it.
///
/// Empty fields are forwarded to the geocoding provider untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub city_name: String,
    pub state_code: String,
    pub country_code: String,
}

impl LocationQuery {
    pub fn new(
        city_name: impl Into<String>,
        state_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            city_name: city_name.into(),
            state_code: state_code.into(),
            country_code: country_code.into(),
        }
    }

    /// The `q` parameter sent to the geocoder: `city,state,country`.
    pub fn search_term(&self) -> String {
        format!("{},{},{}", self.city_name, self.state_code, self.country_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for one coordinate pair, normalized to whole numbers.
///
/// Temperatures and wind speed are truncated toward zero, not rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "main")]
    pub condition_main: String,
    #[serde(rename = "description")]
    pub condition_description: String,
    #[serde(rename = "icon")]
    pub icon_code: String,
    #[serde(rename = "temperature")]
    pub temperature_c: i64,
    #[serde(rename = "feels_like")]
    pub feels_like_c: i64,
    #[serde(rename = "max_temp")]
    pub temp_max_c: i64,
    #[serde(rename = "min_temp")]
    pub temp_min_c: i64,
    #[serde(rename = "humidity")]
    pub humidity_pct: i64,
    #[serde(rename = "pressure")]
    pub pressure_hpa: i64,
    #[serde(rename = "visibility")]
    pub visibility_m: i64,
    #[serde(rename = "wind_speed")]
    pub wind_speed_mps: i64,
    pub wind_degree: i64,
}

impl WeatherSnapshot {
    /// The reply-schema keys, in the order they are emitted.
    pub const KEYS: [&'static str; 12] = [
        "main",
        "description",
        "icon",
        "temperature",
        "feels_like",
        "max_temp",
        "min_temp",
        "pressure",
        "humidity",
        "visibility",
        "wind_speed",
        "wind_degree",
    ];

    /// Flatten into the `data` mapping of a reply.
    pub fn to_map(&self) -> Map<String, Value> {
        let values: [Value; 12] = [
            self.condition_main.clone().into(),
            self.condition_description.clone().into(),
            self.icon_code.clone().into(),
            self.temperature_c.into(),
            self.feels_like_c.into(),
            self.temp_max_c.into(),
            self.temp_min_c.into(),
            self.pressure_hpa.into(),
            self.humidity_pct.into(),
            self.visibility_m.into(),
            self.wind_speed_mps.into(),
            self.wind_degree.into(),
        ];

        Self::KEYS
            .iter()
            .zip(values)
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn sample_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        condition_main: "Clouds".into(),
        condition_description: "broken clouds".into(),
        icon_code: "04d".into(),
        temperature_c: 15,
        feels_like_c: 14,
        temp_max_c: 17,
        temp_min_c: 13,
        humidity_pct: 72,
        pressure_hpa: 1012,
        visibility_m: 10000,
        wind_speed_mps: 4,
        wind_degree: 240,
    }
}
