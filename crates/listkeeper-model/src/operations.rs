//! ListKeeper operation enums.

use std::fmt;

use crate::types::{ListId, TodoId};

/// The kind of operation a route resolves to, before path parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// List every list.
    ListAll,
    /// Create a list.
    CreateList,
    /// Read one list with its todos.
    GetList,
    /// Create a todo under a list.
    CreateTodo,
    /// Read one todo.
    GetTodo,
}

impl OperationKind {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListAll => "ListAll",
            Self::CreateList => "CreateList",
            Self::GetList => "GetList",
            Self::CreateTodo => "CreateTodo",
            Self::GetTodo => "GetTodo",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved operation with its type-checked path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKeeperOperation {
    /// `GET /lists/`
    ListAll,
    /// `PUT /lists/add`
    CreateList,
    /// `GET /list/{id}`
    GetList {
        /// The list to read.
        id: ListId,
    },
    /// `PUT /list/{id}/createTodo`
    CreateTodo {
        /// The owning list.
        list_id: ListId,
    },
    /// `GET /todo/{id}`
    GetTodo {
        /// The todo to read.
        id: TodoId,
    },
}

impl ListKeeperOperation {
    /// The operation kind, without parameters.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::ListAll => OperationKind::ListAll,
            Self::CreateList => OperationKind::CreateList,
            Self::GetList { .. } => OperationKind::GetList,
            Self::CreateTodo { .. } => OperationKind::CreateTodo,
            Self::GetTodo { .. } => OperationKind::GetTodo,
        }
    }

    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether the operation writes to the store and expects a JSON body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        matches!(self, Self::CreateList | Self::CreateTodo { .. })
    }
}

impl fmt::Display for ListKeeperOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
