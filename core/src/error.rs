//! Normalized error type for the operadoras API client.
//!
//! # Design
//! Every failed exchange is rewritten into one `ApiError`. The variant records
//! why the call failed; the `Display` output is the stable, human-readable
//! message callers show to users. Server-provided `detail` text replaces the
//! fixed message where the classification allows it (404 and "other status"),
//! never for 500.

use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Timeout: the server took too long to respond.";
pub const NETWORK_MESSAGE: &str = "Network error: could not connect to the server.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error.";
pub const UNKNOWN_MESSAGE: &str = "Unknown error.";

/// Errors returned by `OperadorasClient` parse methods and `OperadorasService`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The exchange exceeded the configured timeout.
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// No response was received at all.
    #[error("{}", NETWORK_MESSAGE)]
    Network,

    /// The server returned 404.
    #[error("{}", .detail.as_deref().unwrap_or(NOT_FOUND_MESSAGE))]
    NotFound { detail: Option<String> },

    /// The server returned 500. Any detail in the body is dropped.
    #[error("{}", SERVER_ERROR_MESSAGE)]
    Server,

    /// The server returned some other non-2xx status.
    #[error("{}", .detail.as_deref().unwrap_or(UNKNOWN_MESSAGE))]
    Http { status: u16, detail: Option<String> },

    /// A 2xx body did not match the DTO requested through `Payload::typed`.
    /// Never produced by an exchange itself.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The user-facing message, identical to the `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages() {
        assert_eq!(ApiError::Timeout.to_string(), TIMEOUT_MESSAGE);
        assert_eq!(ApiError::Network.to_string(), NETWORK_MESSAGE);
        assert_eq!(ApiError::Server.to_string(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn detail_overrides_fallback() {
        let err = ApiError::NotFound {
            detail: Some("Operator with CNPJ 1 not found".to_string()),
        };
        assert_eq!(err.message(), "Operator with CNPJ 1 not found");

        let err = ApiError::Http {
            status: 422,
            detail: None,
        };
        assert_eq!(err.message(), UNKNOWN_MESSAGE);
    }
}
