use std::{any::Any, sync::Arc};

use crate::{
    error::QueryError,
    model::{LocationQuery, WeatherSnapshot},
    outcome::Outcome,
    provider::{Geocoder, WeatherFetcher},
};

/// Runs geocoding then current weather for one query at a time.
///
/// Holds no per-query state, so one instance can serve any number of
/// concurrent queries.
#[derive(Debug, Clone)]
pub struct QueryOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl QueryOrchestrator {
    pub fn new(geocoder: Arc<dyn Geocoder>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self { geocoder, fetcher }
    }

    /// Answer one query. Never fails: every error, including a panic inside
    /// a provider, becomes [`Outcome::Failure`].
    pub async fn handle(&self, query: LocationQuery) -> Outcome {
        let this = self.clone();
        let task = tokio::spawn(async move { this.resolve_and_fetch(&query).await });

        let result = match task.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_panic() => {
                Err(QueryError::Unexpected(panic_message(join_err.into_panic())))
            }
            Err(join_err) => Err(QueryError::Unexpected(join_err.to_string())),
        };

        match result {
            Ok(snapshot) => {
                log_snapshot(&snapshot);
                Outcome::success(snapshot)
            }
            Err(err) => {
                tracing::error!(error = %err, "Error processing query");
                Outcome::failure(&err)
            }
        }
    }

    async fn resolve_and_fetch(
        &self,
        query: &LocationQuery,
    ) -> Result<WeatherSnapshot, QueryError> {
        let coordinates = self.geocoder.resolve(query).await?;
        let snapshot = self.fetcher.fetch(coordinates).await?;
        Ok(snapshot)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "query task panicked".to_string()
    }
}

fn log_snapshot(snapshot: &WeatherSnapshot) {
    tracing::info!("Received Weather Data:");
    tracing::info!("Main: {}", snapshot.condition_main);
    tracing::info!("Description: {}", snapshot.condition_description);
    tracing::info!("Icon: {}", snapshot.icon_code);
    tracing::info!("Temperature: {}", snapshot.temperature_c);
    tracing::info!("Feels Like: {}", snapshot.feels_like_c);
    tracing::info!("Max Temp: {}", snapshot.temp_max_c);
    tracing::info!("Min Temp: {}", snapshot.temp_min_c);
    tracing::info!("Pressure: {}", snapshot.pressure_hpa);
    tracing::info!("Humidity: {}", snapshot.humidity_pct);
    tracing::info!("Visibility: {}", snapshot.visibility_m);
    tracing::info!("Wind Speed: {}", snapshot.wind_speed_mps);
    tracing::info!("Wind Degree: {}", snapshot.wind_degree);
}
