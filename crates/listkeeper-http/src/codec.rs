//! JSON codec for list and todo payloads.
//!
//! Decoding is strict: the request must declare `application/json`, the body
//! must parse, unknown fields are rejected and required text must be
//! non-empty. A bad content declaration is `InvalidInput`; every decoding
//! failure is `BadRequest`.

use serde::Serialize;
use serde::de::DeserializeOwned;

use listkeeper_model::error::ListKeeperError;
use listkeeper_model::input::{CreateListInput, CreateTodoInput};

/// Check that the request declares a JSON body.
///
/// Media type parameters such as `charset=utf-8` are accepted.
pub fn ensure_json_content_type(headers: &http::HeaderMap) -> Result<(), ListKeeperError> {
    let declared = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok());

    match declared {
        Some(m) if m.type_() == mime::APPLICATION && m.subtype() == mime::JSON => Ok(()),
        _ => Err(ListKeeperError::unsupported_content_type()),
    }
}

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ListKeeperError> {
    serde_json::from_slice(body)
        .map_err(|e| ListKeeperError::bad_request(format!("Bad Request: {e}")).with_source(e))
}

/// Decode and validate the body of a create-list request.
pub fn decode_create_list(body: &[u8]) -> Result<CreateListInput, ListKeeperError> {
    let input: CreateListInput = decode(body)?;
    input
        .validate()
        .map_err(|msg| ListKeeperError::bad_request(format!("Bad Request: {msg}")))?;
    Ok(input)
}

/// Decode and validate the body of a create-todo request.
pub fn decode_create_todo(body: &[u8]) -> Result<CreateTodoInput, ListKeeperError> {
    let input: CreateTodoInput = decode(body)?;
    input
        .validate()
        .map_err(|msg| ListKeeperError::bad_request(format!("Bad Request: {msg}")))?;
    Ok(input)
}

/// Encode a record as JSON.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ListKeeperError> {
    serde_json::to_vec(value)
        .map_err(|e| ListKeeperError::internal_error(format!("Failed to serialize response: {e}")))
}
