/// Error types for Preview Launcher
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PopupError {
    /// Input could not be parsed as a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Host is not under one of the allowed domains
    #[error("Domain not allowed: {0}")]
    DisallowedDomain(String),

    /// Rewritten hostname was rejected by the URL parser
    #[error("Invalid hostname: {0}")]
    InvalidHost(String),

    #[error("Token generation failed: {0}")]
    Token(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type PopupResult<T> = std::result::Result<T, PopupError>;
