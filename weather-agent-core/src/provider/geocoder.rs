use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::GeocodeError,
    model::{Coordinates, LocationQuery},
    provider::truncate_body,
};

use super::Geocoder;

pub const DEFAULT_GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";

/// OpenWeather direct geocoding (`/geo/1.0/direct`).
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            api_key,
            endpoint: endpoint.into(),
            http,
        }
    }

    async fn lookup(&self, term: &str) -> Result<Coordinates, GeocodeError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", term), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GeocodeError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        // Only the first match matters, so later entries are never validated.
        let matches: Vec<Value> = serde_json::from_str(&body)?;
        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResults(term.to_string()))?;

        let place: GeoMatch = serde_json::from_value(first)?;
        let (Some(latitude), Some(longitude)) = (place.lat, place.lon) else {
            return Err(GeocodeError::MissingCoordinates(term.to_string()));
        };

        tracing::debug!(
            term,
            name = place.name.as_deref().unwrap_or("?"),
            country = place.country.as_deref().unwrap_or("?"),
            latitude,
            longitude,
            "Resolved location"
        );

        Ok(Coordinates { latitude, longitude })
    }
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    lat: Option<f64>,
    lon: Option<f64>,
    name: Option<String>,
    country: Option<String>,
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinates, GeocodeError> {
        let term = query.search_term();
        let result = self.lookup(&term).await;
        if let Err(err) = &result {
            tracing::warn!(%term, error = %err, "Error in geocoding lookup");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder_for(server: &MockServer) -> OpenWeatherGeocoder {
        OpenWeatherGeocoder::with_endpoint(
            "test_key".to_string(),
            format!("{}/geo/1.0/direct", server.uri()),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn resolves_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Springfield,IL,US"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "name": "Springfield",
                    "lat": 39.7990,
                    "lon": -89.6440,
                    "country": "US",
                    "state": "Illinois"
                },
                {"name": "Springfield", "lat": 37.2153, "lon": -93.2982, "country": "US"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let coords = geocoder_for(&server)
            .resolve(&LocationQuery::new("Springfield", "IL", "US"))
            .await
            .unwrap();

        assert_eq!(coords.latitude, 39.7990);
        assert_eq!(coords.longitude, -89.6440);
    }

    #[tokio::test]
    async fn ignores_malformed_later_matches() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"lat": 1.5, "lon": 2.5}, {"lat": "north"}])),
            )
            .mount(&server)
            .await;

        let coords = geocoder_for(&server)
            .resolve(&LocationQuery::new("a", "b", "c"))
            .await
            .unwrap();

        assert_eq!(coords, Coordinates { latitude: 1.5, longitude: 2.5 });
    }

    #[tokio::test]
    async fn empty_array_is_no_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = geocoder_for(&server)
            .resolve(&LocationQuery::new("Atlantis", "", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, GeocodeError::NoResults(ref term) if term == "Atlantis,,"));
    }

    #[tokio::test]
    async fn missing_lon_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"lat": 10.0}])))
            .mount(&server)
            .await;

        let err = geocoder_for(&server)
            .resolve(&LocationQuery::new("x", "y", "z"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeocodeError::MissingCoordinates(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;

        let err = geocoder_for(&server)
            .resolve(&LocationQuery::new("London", "", "GB"))
            .await
            .unwrap_err();

        match err {
            GeocodeError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn object_payload_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"lat": 1.0, "lon": 2.0})),
            )
            .mount(&server)
            .await;

        let err = geocoder_for(&server)
            .resolve(&LocationQuery::new("x", "y", "z"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeocodeError::Parse(_)));
    }
}
