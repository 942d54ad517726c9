//! ListKeeper HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use tracing::Instrument;

use listkeeper_model::error::ListKeeperError;

use crate::codec::ensure_json_content_type;
use crate::dispatch::{ListKeeperHandler, dispatch_operation};
use crate::response::{
    CONTENT_TYPE, ListKeeperResponseBody, REQUEST_ID_HEADER, error_to_response, json_response,
};
use crate::router::resolve_operation;

/// Path answered by the built-in health check.
pub const HEALTH_PATH: &str = "/_health";

/// Default cap on request body size.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Error type accepted from request bodies.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for the ListKeeper HTTP service.
#[derive(Debug, Clone)]
pub struct ListKeeperHttpConfig {
    /// Value of the `server` response header.
    pub server_name: String,
    /// Whether to add `access-control-allow-origin: *` to every response.
    pub allow_any_origin: bool,
    /// Largest request body accepted, in bytes.
    pub max_body_size: usize,
}

impl Default for ListKeeperHttpConfig {
    fn default() -> Self {
        Self {
            server_name: "ListKeeper".to_owned(),
            allow_any_origin: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Hyper `Service` implementation for ListKeeper.
///
/// Wraps a [`ListKeeperHandler`] implementation and routes incoming HTTP
/// requests to the matching list/todo operation.
#[derive(Debug)]
pub struct ListKeeperHttpService<H: ListKeeperHandler> {
    handler: Arc<H>,
    config: Arc<ListKeeperHttpConfig>,
}

impl<H: ListKeeperHandler> ListKeeperHttpService<H> {
    /// Create a new `ListKeeperHttpService`.
    pub fn new(handler: Arc<H>, config: ListKeeperHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }

    /// Handle one request with any body type.
    ///
    /// This is what the hyper `Service` impl calls; tests use it directly with
    /// in-memory bodies.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<ListKeeperResponseBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "request",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = %request_id,
        );

        async {
            let response = process_request(req, self.handler.as_ref(), &self.config).await;
            tracing::debug!(status = response.status().as_u16(), "request completed");
            add_common_headers(response, &request_id, &self.config)
        }
        .instrument(span)
        .await
    }
}

impl<H: ListKeeperHandler> Clone for ListKeeperHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: ListKeeperHandler> hyper::service::Service<http::Request<Incoming>>
    for ListKeeperHttpService<H>
{
    type Response = http::Response<ListKeeperResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let svc = self.clone();
        Box::pin(async move { Ok(svc.handle(req).await) })
    }
}

/// Process a single request through the full pipeline.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    config: &ListKeeperHttpConfig,
) -> http::Response<ListKeeperResponseBody>
where
    H: ListKeeperHandler,
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let (parts, incoming) = req.into_parts();

    // 1. Built-in health check.
    if parts.method == http::Method::GET && parts.uri.path() == HEALTH_PATH {
        return health_response(handler).await;
    }

    // 2. Route: method + path to a typed operation.
    let op = match resolve_operation(&parts.method, parts.uri.path()) {
        Ok(op) => op,
        Err(err) => return render_error(&err),
    };

    // 3. Writes must declare JSON before anything is read or stored.
    if op.has_body() {
        if let Err(err) = ensure_json_content_type(&parts.headers) {
            return render_error(&err);
        }
    }

    // 4. Collect body.
    let body = match collect_body(incoming, config.max_body_size).await {
        Ok(body) => body,
        Err(err) => return render_error(&err),
    };

    // 5. Dispatch to handler.
    match dispatch_operation(handler, op, body).await {
        Ok(response) => response,
        Err(err) => render_error(&err),
    }
}

async fn health_response<H: ListKeeperHandler>(
    handler: &H,
) -> http::Response<ListKeeperResponseBody> {
    match handler.health_check().await {
        Ok(()) => {
            let json = serde_json::json!({
                "status": "running",
                "version": env!("CARGO_PKG_VERSION"),
            });
            json_response(http::StatusCode::OK, json.to_string().into_bytes())
        }
        Err(err) => render_error(&err),
    }
}

/// Render an error through the envelope, logging server-side failures.
fn render_error(err: &ListKeeperError) -> http::Response<ListKeeperResponseBody> {
    if err.status_code.is_server_error() {
        tracing::error!(code = %err.code, error = %err.message, "request failed");
    } else {
        tracing::debug!(code = %err.code, error = %err.message, "request rejected");
    }
    error_to_response(err)
}

/// Collect the incoming body into a single `Bytes` buffer of at most `limit` bytes.
async fn collect_body<B>(incoming: B, limit: usize) -> Result<Bytes, ListKeeperError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    Limited::new(incoming, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                ListKeeperError::bad_request(format!("Bad Request: body exceeds {limit} bytes"))
            } else {
                ListKeeperError::internal_error(format!("Failed to read request body: {e}"))
            }
        })
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<ListKeeperResponseBody>,
    request_id: &str,
    config: &ListKeeperHttpConfig,
) -> http::Response<ListKeeperResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, hv);
    }

    headers
        .entry(http::header::CONTENT_TYPE)
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    if let Ok(hv) = http::HeaderValue::from_str(&config.server_name) {
        headers.insert(http::header::SERVER, hv);
    }

    if config.allow_any_origin {
        headers.insert(
            http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
            http::HeaderValue::from_static("*"),
        );
    }

    response
}
