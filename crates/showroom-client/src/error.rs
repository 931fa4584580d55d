//! Error types for Resource Service calls.

use thiserror::Error;

/// Errors produced by Resource Service operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Transport-level failure (unreachable host, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The admin credential was rejected.
    #[error("authorization rejected")]
    Auth {
        /// Server-provided detail message, when present.
        detail: Option<String>,
    },

    /// The service rejected the request payload.
    #[error("validation rejected")]
    Validation {
        /// Server-provided detail message, when present.
        detail: Option<String>,
    },

    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other 4xx response.
    #[error("client error (status {status})")]
    Client {
        status: u16,
        detail: Option<String>,
    },

    /// 5xx response.
    #[error("server error (status {status})")]
    Server { status: u16 },

    /// The response body could not be decoded.
    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns a message suitable for direct display to the user.
    ///
    /// Server-provided detail is preferred over the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the vehicle service. Please check your connection.".to_string()
            }
            Self::Auth { detail } => detail.clone().unwrap_or_else(|| {
                "You are not authorized for this action. Invalid admin token.".to_string()
            }),
            Self::Validation { detail } => detail
                .clone()
                .unwrap_or_else(|| "The request was rejected by the service.".to_string()),
            Self::NotFound => "The requested item could not be found.".to_string(),
            Self::Client { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| "The request could not be completed.".to_string()),
            Self::Server { .. } => {
                "The vehicle service hit an internal error. Please try again later.".to_string()
            }
            Self::Decode(_) => "Received an unexpected response from the service.".to_string(),
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for Resource Service operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_preferred_for_display() {
        let err = ApiError::Auth {
            detail: Some("You are not authorized for this action. Invalid admin token.".into()),
        };
        assert!(err.user_message().contains("Invalid admin token"));

        let err = ApiError::Validation { detail: None };
        assert!(err.user_message().contains("rejected"));
    }

    #[test]
    fn transient_kinds_are_retryable() {
        assert!(ApiError::Network("connection refused".into()).is_retryable());
        assert!(ApiError::Server { status: 503 }.is_retryable());
        assert!(!ApiError::NotFound.is_retryable());
        assert!(
            !ApiError::Auth { detail: None }.is_retryable(),
            "a rejected credential will not fix itself"
        );
    }
}
