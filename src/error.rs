//! Error types for the SES email backend.
//!
//! The crate distinguishes exactly two failure kinds:
//!
//! - [`SesError::Configuration`]: missing or invalid settings, raised when
//!   a config or client is constructed, never at send time.
//! - [`SesError::Client`]: any signing, transport, HTTP-status, or
//!   response-parsing failure during a send. The underlying cause is kept
//!   as the error source.
//!
//! Whether a `Client` error is surfaced or suppressed is decided by the
//! backend layer alone (see [`crate::backend::SesEmailBackend`]); nothing in
//! the signing or HTTP layers swallows errors.

use thiserror::Error;

/// Result type alias for SES operations.
pub type SesResult<T> = std::result::Result<T, SesError>;

/// Top-level error type for the SES email backend.
#[derive(Debug, Error)]
pub enum SesError {
    /// Missing or invalid configuration.
    ///
    /// Raised at construction when a required setting (access key, secret
    /// key, region) is absent or empty, or when the endpoint cannot be
    /// parsed as a URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use aws_ses_backend::SesError;
    ///
    /// let error = SesError::configuration("region is required");
    /// assert_eq!(error.to_string(), "configuration error: region is required");
    /// ```
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A send attempt failed.
    ///
    /// This single kind wraps transport failures, timeouts, non-success
    /// HTTP statuses, and malformed response bodies, carrying the
    /// underlying cause as context.
    #[error("SES client error: {message}")]
    Client {
        /// Description of the failure.
        message: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SesError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SesError::Configuration {
            message: message.into(),
        }
    }

    /// Create a client error with no underlying cause.
    pub fn client(message: impl Into<String>) -> Self {
        SesError::Client {
            message: message.into(),
            source: None,
        }
    }

    /// Create a client error wrapping an underlying cause.
    pub fn client_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SesError::Client {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SesError::Configuration { .. })
    }

    /// Returns true if this is a client (send-time) error.
    pub fn is_client(&self) -> bool {
        matches!(self, SesError::Client { .. })
    }
}

impl From<reqwest::Error> for SesError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        SesError::Client {
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for SesError {
    fn from(err: serde_json::Error) -> Self {
        SesError::Client {
            message: format!("malformed JSON: {}", err),
            source: Some(Box::new(err)),
        }
    }
}
