//! JSON success responses and the uniform error envelope.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

use listkeeper_model::error::ListKeeperError;

/// Content type for every ListKeeper response.
pub const CONTENT_TYPE: &str = "application/json";

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response body type. All responses are fully buffered.
pub type ListKeeperResponseBody = Full<Bytes>;

/// The error envelope written for every failure.
///
/// ```json
/// { "message": "Invalid id", "status": 422, "error": "Unprocessable Entity" }
/// ```
#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    message: &'a str,
    status: u16,
    error: &'a str,
}

/// Serialize a `ListKeeperError` into the JSON envelope.
#[must_use]
pub fn error_to_json(error: &ListKeeperError) -> Vec<u8> {
    serde_json::to_vec(&ErrorEnvelope {
        message: &error.message,
        status: error.status_code.as_u16(),
        error: error.reason(),
    })
    .expect("JSON serialization of error envelope cannot fail")
}

/// Convert a `ListKeeperError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &ListKeeperError) -> http::Response<ListKeeperResponseBody> {
    json_response(error.status_code, error_to_json(error))
}

/// Build a response from JSON bytes.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    json: Vec<u8>,
) -> http::Response<ListKeeperResponseBody> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(Full::new(Bytes::from(json)))
        .expect("valid JSON response")
}
