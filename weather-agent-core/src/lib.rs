//! Core library for the weather agent.
//!
//! This crate defines:
//! - The geocode-then-weather lookup pipeline and its failure taxonomy
//! - Typed parsing of the OpenWeather geocoding and current-weather payloads
//! - The uniform success/failure reply envelope
//! - Configuration & credentials handling
//! - A newline-delimited JSON request/reply loop
//!
//! It is used by `weather-agent-cli`, but the pipeline can be driven from any
//! transport: [`QueryOrchestrator::handle`] maps one query to one outcome.

pub mod channel;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod outcome;
pub mod provider;

pub use config::Config;
pub use error::{GeocodeError, QueryError, WeatherError};
pub use model::{Coordinates, LocationQuery, WeatherSnapshot};
pub use orchestrator::QueryOrchestrator;
pub use outcome::{Outcome, QueryResponse, Status};
pub use provider::{Geocoder, WeatherFetcher, orchestrator_from_config};
