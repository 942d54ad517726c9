//! ListKeeper error types.
//!
//! Every failure is rendered to clients as a JSON envelope carrying the
//! message, the numeric status and the canonical reason phrase.

use std::fmt;

/// Failure categories exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ListKeeperErrorCode {
    /// Malformed identifier, missing path segment or wrong content declaration.
    InvalidInput,
    /// Malformed, incomplete or over-specified request body.
    BadRequest,
    /// No route matches, or the referenced resource does not exist.
    NotFound,
    /// The storage backend failed.
    StorageError,
    /// Anything else that went wrong on the server side.
    InternalError,
}

impl ListKeeperErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::BadRequest => "BadRequest",
            Self::NotFound => "NotFound",
            Self::StorageError => "StorageError",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::InvalidInput => http::StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => http::StatusCode::BAD_REQUEST,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::StorageError | Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ListKeeperErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ListKeeper error response.
#[derive(Debug)]
pub struct ListKeeperError {
    /// The error code.
    pub code: ListKeeperErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ListKeeperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListKeeperError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for ListKeeperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ListKeeperError {
    /// Create a new `ListKeeperError` with a custom message.
    #[must_use]
    pub fn with_message(code: ListKeeperErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The canonical reason phrase of the status code, e.g. `"Not Found"`.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.status_code.canonical_reason().unwrap_or("Unknown Error")
    }

    // -- Convenience constructors --

    /// Malformed identifier or other invalid request input.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::with_message(ListKeeperErrorCode::InvalidInput, message)
    }

    /// The request did not declare a JSON body.
    #[must_use]
    pub fn unsupported_content_type() -> Self {
        Self::with_message(ListKeeperErrorCode::InvalidInput, "Content type is not JSON")
    }

    /// Malformed or over-specified request body.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(ListKeeperErrorCode::BadRequest, message)
    }

    /// Resource or route not found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ListKeeperErrorCode::NotFound, message)
    }

    /// No route matches the method and path.
    #[must_use]
    pub fn no_route(method: &http::Method, path: &str) -> Self {
        Self::with_message(
            ListKeeperErrorCode::NotFound,
            format!("no route for {method} {path}"),
        )
    }

    /// Storage backend failure.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::with_message(ListKeeperErrorCode::StorageError, message)
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(ListKeeperErrorCode::InternalError, message)
    }
}
