//! ListKeeper handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use listkeeper_model::error::ListKeeperError;
use listkeeper_model::operations::ListKeeperOperation;

use crate::response::ListKeeperResponseBody;

/// Boxed future returned by handler methods.
pub type HandlerFuture<T> = Pin<Box<dyn Future<Output = Result<T, ListKeeperError>> + Send>>;

/// Trait that the list/todo business logic must implement.
///
/// The handler receives a resolved operation (path parameters already typed)
/// and the raw body bytes, and returns a complete HTTP response. This trait is
/// the boundary between the HTTP transport layer and the business logic.
pub trait ListKeeperHandler: Send + Sync + 'static {
    /// Handle an operation and produce an HTTP response.
    fn handle_operation(
        &self,
        op: ListKeeperOperation,
        body: Bytes,
    ) -> HandlerFuture<http::Response<ListKeeperResponseBody>>;

    /// Report whether the backing store is reachable.
    fn health_check(&self) -> HandlerFuture<()> {
        Box::pin(async { Ok(()) })
    }
}

/// Dispatch an operation to the handler.
pub async fn dispatch_operation<H: ListKeeperHandler>(
    handler: &H,
    op: ListKeeperOperation,
    body: Bytes,
) -> Result<http::Response<ListKeeperResponseBody>, ListKeeperError> {
    tracing::debug!(operation = %op, "dispatching operation");
    handler.handle_operation(op, body).await
}

/// Handler that fails every operation. Useful for exercising the HTTP layer alone.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl ListKeeperHandler for NotImplementedHandler {
    fn handle_operation(
        &self,
        op: ListKeeperOperation,
        _body: Bytes,
    ) -> HandlerFuture<http::Response<ListKeeperResponseBody>> {
        Box::pin(async move {
            Err(ListKeeperError::internal_error(format!(
                "operation {op} is not implemented"
            )))
        })
    }
}
