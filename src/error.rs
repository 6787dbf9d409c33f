// src/error.rs
//! Error types for the client.
//!
//! Two layers: `ConversionError` describes why a single model/wire
//! conversion could not happen, and `NotionClientError` is the one family
//! callers catch for anything a client call can fail with.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// The envelope's `code` string is kept verbatim on the error; this enum is
/// the pattern-matchable view of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// The error body could not be parsed
    Unexpected,
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            "unexpected" => Self::Unexpected,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unexpected => write!(f, "unexpected"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Which half of a converter was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// wire → model
    Decode,
    /// model → wire
    Encode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Decode => write!(f, "api-to-model"),
            Direction::Encode => write!(f, "model-to-api"),
        }
    }
}

/// Why a single model/wire conversion failed.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("{converter} does not support {direction} conversion")]
    NotSupported {
        converter: &'static str,
        direction: Direction,
    },

    #[error("Cannot send {family} of unknown type '{type_name}' to the API")]
    UnknownVariant {
        family: &'static str,
        type_name: String,
    },

    #[error("{family} '{variant}' is read-only and cannot be sent to the API")]
    ReadOnly {
        family: &'static str,
        variant: &'static str,
    },

    #[error("A workspace cannot be the parent of a created object")]
    WorkspaceNotAllowed,

    #[error("{family} is missing required field '{field}'")]
    MissingField { family: &'static str, field: String },

    #[error("Invalid date or date-time: {0}")]
    InvalidDate(String),

    #[error("Malformed {family} payload: {source}")]
    Malformed {
        family: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Every failure a client call can surface.
#[derive(Error, Debug)]
pub enum NotionClientError {
    /// The server rejected the request with a non-2xx status.
    #[error("Notion API request failed ({code}): {message}")]
    Request {
        code: String,
        message: String,
        status: Option<u16>,
        /// Raw `details` object as JSON text, `"{}"` when absent
        details: String,
    },

    /// Any other transport or runtime failure.
    #[error("Notion client error: {message}")]
    Client {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("The client was used after close()")]
    Closed,
}

impl NotionClientError {
    /// Typed view of the envelope code, for request errors.
    pub fn error_code(&self) -> Option<NotionErrorCode> {
        match self {
            Self::Request { code, .. } => Some(NotionErrorCode::from_api_response(code)),
            _ => None,
        }
    }

    /// HTTP status for request errors, when known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = NotionClientError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_vocabulary_round_trips() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "validation_error",
            "unexpected",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new"),
            NotionErrorCode::Unknown("brand_new".to_string())
        );
    }

    #[test]
    fn test_retryable_codes() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(NotionErrorCode::ServiceUnavailable.is_retryable());
        assert!(!NotionErrorCode::ValidationFailed.is_retryable());
        assert!(NotionErrorCode::ObjectNotFound.is_not_found());
    }

    #[test]
    fn test_request_error_accessors() {
        let err = NotionClientError::Request {
            code: "object_not_found".to_string(),
            message: "Could not find page".to_string(),
            status: Some(404),
            details: "{}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_code(), Some(NotionErrorCode::ObjectNotFound));
        assert_eq!(
            err.to_string(),
            "Notion API request failed (object_not_found): Could not find page"
        );
        assert_eq!(NotionClientError::Closed.status(), None);
    }
}
