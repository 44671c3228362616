//! Error types for the tarot client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TarotError>;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TarotError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TarotError::InvalidInput(_) => 3,
            TarotError::Api(ApiError::Transport(_)) => 2,
            TarotError::Api(_) => 1,
            TarotError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Failures of a single request against the reading service.
///
/// Every call is all-or-nothing: a non-success status, a transport failure
/// and a body that does not match the expected shape are all errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered outside the 2xx range
    #[error("Request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...)
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body did not decode into the expected type
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed request, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
