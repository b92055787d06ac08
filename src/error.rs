//! Error types for the ssokey CLI

use thiserror::Error;

/// Result type alias for ssokey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Credential store error: {0}")]
    CredentialStore(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors from the SSO-OIDC and SSO portal APIs
#[derive(Debug, Error)]
pub enum ApiError {
    /// The user has not yet approved the device code. Retryable; the
    /// token acquirer's poll loop consumes this and never surfaces it.
    #[error("Authorization pending. Complete the sign-in in your browser.")]
    AuthorizationPending,

    /// The provider asked us to poll less aggressively. Retryable.
    #[error("Provider requested slower polling")]
    SlowDown,

    /// The device code expired before the user approved it.
    #[error("Device authorization expired before approval. Run `ssokey login` to start over.")]
    AuthorizationExpired,

    /// The user denied the authorization request in the browser.
    #[error("Authorization request was denied")]
    AccessDenied,

    #[error("Access token expired or invalid. Run `ssokey login` to sign in again.")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Any other service error, passed through with the provider's own
    /// error code and message intact.
    #[error("Provider error [{code}]: {message}")]
    Provider { code: String, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// Whether the poll loop should keep waiting on this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::AuthorizationPending | ApiError::SlowDown)
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `ssokey init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Identity Center start URL not configured. Run `ssokey init` to set up.")]
    MissingStartUrl,

    #[error("No access token available. Run `ssokey login` to sign in.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
