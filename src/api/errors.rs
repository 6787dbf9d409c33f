// src/api/errors.rs
//! Turns transport failures into the client's error family.

use super::transport::TransportError;
use super::wire::ApiErrorEnvelope;
use crate::constants::{EMPTY_ERROR_DETAILS, UNEXPECTED_ERROR_CODE, UNEXPECTED_ERROR_MESSAGE_PREFIX};
use crate::error::NotionClientError;

/// Classifies a failed request.
///
/// A status error whose body is a Notion error envelope keeps the
/// envelope's code, message and details. Any other status error becomes an
/// `unexpected` request error carrying the HTTP status. Failures without a
/// response become `Client` errors.
pub(crate) fn classify(error: TransportError) -> NotionClientError {
    match error {
        TransportError::Status { status, body } => {
            match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                Ok(envelope) => NotionClientError::Request {
                    code: envelope.code,
                    message: envelope.message,
                    status: envelope.status.or(Some(status)),
                    details: envelope
                        .details
                        .map(|details| details.to_string())
                        .unwrap_or_else(|| EMPTY_ERROR_DETAILS.to_string()),
                },
                Err(parse_error) => {
                    log::warn!(
                        "Could not read the error body of an HTTP {} response: {}",
                        status,
                        parse_error
                    );
                    let cause = TransportError::Status { status, body };
                    NotionClientError::Request {
                        code: UNEXPECTED_ERROR_CODE.to_string(),
                        message: format!("{}{}", UNEXPECTED_ERROR_MESSAGE_PREFIX, cause),
                        status: Some(status),
                        details: EMPTY_ERROR_DETAILS.to_string(),
                    }
                }
            }
        }
        TransportError::Io { message } => NotionClientError::Client {
            message,
            source: None,
        },
    }
}
