//! ListKeeper handler implementation bridging HTTP to business logic.

use std::sync::Arc;

use bytes::Bytes;

use listkeeper_http::ListKeeperResponseBody;
use listkeeper_http::codec::{decode_create_list, decode_create_todo, encode};
use listkeeper_http::dispatch::{HandlerFuture, ListKeeperHandler};
use listkeeper_http::response::json_response;
use listkeeper_model::error::ListKeeperError;
use listkeeper_model::operations::ListKeeperOperation;

use crate::provider::ListKeeperProvider;

/// Handler that bridges the HTTP layer to the list/todo provider.
#[derive(Debug)]
pub struct ListKeeperCoreHandler {
    provider: Arc<ListKeeperProvider>,
}

impl ListKeeperCoreHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<ListKeeperProvider>) -> Self {
        Self { provider }
    }
}

impl ListKeeperHandler for ListKeeperCoreHandler {
    fn handle_operation(
        &self,
        op: ListKeeperOperation,
        body: Bytes,
    ) -> HandlerFuture<http::Response<ListKeeperResponseBody>> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { dispatch(provider.as_ref(), op, &body).await })
    }

    fn health_check(&self) -> HandlerFuture<()> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { provider.health_check().await })
    }
}

/// Dispatch an operation to the matching provider method.
async fn dispatch(
    provider: &ListKeeperProvider,
    op: ListKeeperOperation,
    body: &[u8],
) -> Result<http::Response<ListKeeperResponseBody>, ListKeeperError> {
    match op {
        ListKeeperOperation::ListAll => {
            let output = provider.handle_list_all().await?;
            respond(http::StatusCode::OK, &output)
        }
        ListKeeperOperation::CreateList => {
            let input = decode_create_list(body)?;
            let output = provider.handle_create_list(input).await?;
            respond(http::StatusCode::CREATED, &output)
        }
        ListKeeperOperation::GetList { id } => {
            let output = provider.handle_get_list(id).await?;
            respond(http::StatusCode::OK, &output)
        }
        ListKeeperOperation::CreateTodo { list_id } => {
            let input = decode_create_todo(body)?;
            let output = provider.handle_create_todo(list_id, input).await?;
            respond(http::StatusCode::CREATED, &output)
        }
        ListKeeperOperation::GetTodo { id } => {
            let output = provider.handle_get_todo(id).await?;
            respond(http::StatusCode::OK, &output)
        }
    }
}

fn respond<T: serde::Serialize>(
    status: http::StatusCode,
    output: &T,
) -> Result<http::Response<ListKeeperResponseBody>, ListKeeperError> {
    Ok(json_response(status, encode(output)?))
}
