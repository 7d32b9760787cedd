use reqwest::StatusCode;
use thiserror::Error;

/// Why a place description could not be turned into coordinates.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse geocoding response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no geocoding results for '{0}'")]
    NoResults(String),

    #[error("first geocoding result for '{0}' has no lat/lon")]
    MissingCoordinates(String),
}

/// Why current weather could not be fetched or normalized.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response is missing `{0}`")]
    MissingField(&'static str),
}

/// What a failed query reports to its caller.
///
/// The display text of each variant is the reply message; provider details
/// stay in the source chain.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Failed to get lat/lon")]
    Geocode(#[from] GeocodeError),

    #[error("Failed to get weather data")]
    Weather(#[from] WeatherError),

    #[error("{0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn query_error_messages_hide_provider_details() {
        let geo = QueryError::from(GeocodeError::NoResults("Nowhere,,XX".into()));
        assert_eq!(geo.to_string(), "Failed to get lat/lon");
        assert!(geo.source().is_some());

        let weather = QueryError::from(WeatherError::MissingField("weather[0]"));
        assert_eq!(weather.to_string(), "Failed to get weather data");
        assert_eq!(
            weather.source().map(|s| s.to_string()).as_deref(),
            Some("weather response is missing `weather[0]`")
        );
    }

    #[test]
    fn unexpected_error_is_verbatim() {
        let err = QueryError::Unexpected("boom".into());
        assert_eq!(err.to_string(), "boom");
    }
}
