use thiserror::Error;

/// Custom error type for sentira operations.
#[derive(Debug, Error)]
pub enum SentiraError {
    /// Model artifact loading or inference failed.
    #[error("Model error: {0}")]
    Model(String),

    /// History store I/O or serialization failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Input validation failed at the request boundary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be resolved.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for SentiraError {
    fn from(err: std::io::Error) -> Self {
        SentiraError::Store(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for SentiraError {
    fn from(err: serde_json::Error) -> Self {
        SentiraError::Store(format!("JSON serialization error: {}", err))
    }
}
