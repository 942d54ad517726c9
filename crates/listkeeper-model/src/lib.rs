//! List and Todo model types for ListKeeper.
//!
//! These types are shared by the HTTP layer (routing and JSON codec) and the
//! core layer (store and resource operations). Field names follow the JSON
//! wire format: `id`, `name`, `description` for lists and `id`,
//! `description`, `status`, `listId` for todos.
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use error::{ListKeeperError, ListKeeperErrorCode};
pub use operations::{ListKeeperOperation, OperationKind};
pub use types::{List, ListId, Todo, TodoId, TodoStatus};
