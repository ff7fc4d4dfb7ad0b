//! Error handling for the application

use thiserror::Error;

/// Pool source (upstream API) errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Upstream API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("API request failed with status {0}")]
    BadStatus(u16),

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("Malformed pool record: {0}")]
    MalformedRecord(String),
}

/// Token search errors
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    #[error("Invalid pair format: {0}")]
    InvalidQuery(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source error: {0}")]
    SourceError(String),

    #[error("Search error: {0}")]
    SearchError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::SourceError(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::SearchError(err.to_string())
    }
}
