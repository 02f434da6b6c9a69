use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Region, credentials or endpoint could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The transport could not reach the service or got no usable response.
    #[error("Connection failed: {0}")]
    Connection(String),
    /// The service rejected the credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// The request was malformed or named something that does not exist.
    #[error("Request failed: {0}")]
    Request(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
