//! Mapping from store failures to client-facing errors.

use listkeeper_model::error::ListKeeperError;

use crate::store::StoreError;

/// Convert a store error into a ListKeeper error.
///
/// A missing parent list is the client's problem (`NotFound`); everything
/// else is a storage failure. Driver details are logged, not returned.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn store_error_to_listkeeper(e: StoreError) -> ListKeeperError {
    match e {
        StoreError::ListNotFound(id) => ListKeeperError::not_found(format!("list {id} not found")),
        StoreError::Database(source) => {
            tracing::warn!(error = %source, "storage operation failed");
            ListKeeperError::storage("Unable to complete storage operation").with_source(source)
        }
        e @ StoreError::CorruptRow { .. } => {
            tracing::error!(error = %e, "unreadable row in store");
            ListKeeperError::storage("Unable to read stored row")
        }
    }
}
