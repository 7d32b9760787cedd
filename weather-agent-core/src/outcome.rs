use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::QueryError, model::WeatherSnapshot};

pub const SUCCESS_MESSAGE: &str = "Weather data retrieved successfully";

/// Result of one query: either a snapshot or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { message: String, data: WeatherSnapshot },
    Failure { message: String },
}

impl Outcome {
    pub fn success(data: WeatherSnapshot) -> Self {
        Outcome::Success {
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }

    pub fn failure(err: &QueryError) -> Self {
        Outcome::Failure {
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } | Outcome::Failure { message } => message,
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Outcome::Success { data, .. } => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    /// Wire form of the outcome; `data` is empty on failure.
    pub fn into_response(self) -> QueryResponse {
        match self {
            Outcome::Success { message, data } => QueryResponse {
                status: Status::Success,
                message,
                data: data.to_map(),
            },
            Outcome::Failure { message } => QueryResponse {
                status: Status::Fail,
                message,
                data: Map::new(),
            },
        }
    }
}

impl From<Result<WeatherSnapshot, QueryError>> for Outcome {
    fn from(result: Result<WeatherSnapshot, QueryError>) -> Self {
        match result {
            Ok(snapshot) => Outcome::success(snapshot),
            Err(err) => Outcome::failure(&err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// The reply body: `{status, message, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: Status,
    pub message: String,
    pub data: Map<String, Value>,
}

impl From<Outcome> for QueryResponse {
    fn from(outcome: Outcome) -> Self {
        outcome.into_response()
    }
}
