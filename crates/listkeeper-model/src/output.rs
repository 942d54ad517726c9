//! Response shapes that are not plain records.

use serde::{Deserialize, Serialize};

use crate::types::{List, Todo};

/// Output of `GET /list/{id}`: the list fields plus its todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWithTodos {
    /// The list itself, flattened into the top-level object.
    #[serde(flatten)]
    pub list: List,

    /// Todos owned by the list, in creation order.
    pub todos: Vec<Todo>,
}
