//! Error types for the client layer.
//!
//! A call can fail in exactly two ways: the request never produced a usable
//! response ([`TransportError`]), or it did and the backend rejected it in the
//! envelope ([`ApiError::Domain`]). Both arrive through [`ApiError`].

use wikift_core::EnvelopeError;

/// Failure to obtain a usable response body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A non-reqwest transport could not reach the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The backend returned a non-2xx status code.
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Classify a reqwest failure, keeping timeouts distinct.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e)
        }
    }
}

/// Outcome of a failed service call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transported fine, rejected by the backend for business reasons.
    #[error("Request rejected with code {code}: {}", message.as_deref().unwrap_or("no message"))]
    Domain { code: i64, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// The backend answered HTTP 401 or 403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Status {
                status: 401 | 403,
                ..
            })
        )
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected { code, message } => Self::Domain { code, message },
            EnvelopeError::Malformed(e) => Self::Transport(TransportError::Decode(e.to_string())),
        }
    }
}

/// Convenience alias for service return values.
pub type ApiResult<T> = Result<T, ApiError>;
