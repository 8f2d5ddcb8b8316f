use reqwest::StatusCode;
use thiserror::Error;

/// The selection was rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no city selected")]
    NoCitySelected,
}

/// Network, transport or HTTP-status failure while fetching a payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch weather data: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to fetch weather data: server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to fetch weather data: response was not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Wrap a reqwest error with the request URL stripped; the URL carries the API key.
    pub fn transport(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

/// The payload did not have the expected shape or values.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed weather payload: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("malformed weather payload: `weather` is empty")]
    EmptyWeather,

    #[error("invalid weather payload: `{field}` {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Any failure of the fetch-and-display flow.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FlowError {
    /// Text shown to the user in place of the weather fields.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Validation(_) => "Please select a city".to_string(),
            other => other.to_string(),
        }
    }
}
