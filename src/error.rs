//! Error types.
//!
//! One top-level [`Error`] with a sub-enum per concern. Provider failures keep
//! the HTTP status so callers can tell a rejected request from a broken one.

use std::fmt;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Obs(#[from] ObsError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{action}: {failed} of {matched} keys failed")]
    Incomplete {
        action: &'static str,
        failed: usize,
        matched: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// A request the provider answered with an error, or could not answer.
///
/// `status` is `None` when no HTTP response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub error_msg: String,
    pub request_id: Option<String>,
}

impl ProviderError {
    /// Error built from an HTTP response.
    pub fn http(status: u16, error_code: Option<String>, error_msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            error_code,
            error_msg: error_msg.into(),
            request_id: None,
        }
    }

    /// Error raised before any response arrived.
    pub fn request(error_msg: impl Into<String>) -> Self {
        Self {
            status: None,
            error_code: None,
            error_msg: error_msg.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// HTTP 400: the provider refused the request as-is.
    pub fn is_bad_request(&self) -> bool {
        self.status == Some(400)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "provider returned {}", status)?,
            None => write!(f, "provider request failed")?,
        }
        if let Some(code) = &self.error_code {
            write!(f, " [{}]", code)?;
        }
        write!(f, ": {}", self.error_msg)?;
        if let Some(id) = &self.request_id {
            write!(f, " (request id {})", id)?;
        }
        Ok(())
    }
}

/// Object storage manifest errors.
#[derive(Error, Debug)]
pub enum ObsError {
    #[error("malformed obs url '{url}': {reason}")]
    MalformedUrl { url: String, reason: &'static str },

    #[error("get obs object failed: {status} {code}, {message}")]
    FetchFailed {
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid manifest: {0}")]
    Manifest(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The provider error behind this error, if any.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Error::Provider(e) => Some(e),
            _ => None,
        }
    }
}
