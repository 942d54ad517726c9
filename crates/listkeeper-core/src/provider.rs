//! List and todo resource operations.

use listkeeper_model::error::ListKeeperError;
use listkeeper_model::input::{CreateListInput, CreateTodoInput};
use listkeeper_model::output::ListWithTodos;
use listkeeper_model::types::{List, ListId, Todo, TodoId, TodoStatus};

use crate::error::store_error_to_listkeeper;
use crate::store::ListStore;

/// Business logic for lists and todos on top of a [`ListStore`].
#[derive(Debug, Clone)]
pub struct ListKeeperProvider {
    store: ListStore,
}

impl ListKeeperProvider {
    /// Create a provider over an opened store.
    #[must_use]
    pub fn new(store: ListStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// `GET /lists/`: every list in insertion order.
    pub async fn handle_list_all(&self) -> Result<Vec<List>, ListKeeperError> {
        self.store
            .select_all_lists()
            .await
            .map_err(store_error_to_listkeeper)
    }

    /// `GET /list/{id}`: one list with its todos.
    pub async fn handle_get_list(&self, id: ListId) -> Result<ListWithTodos, ListKeeperError> {
        let list = self
            .store
            .select_list_by_id(id)
            .await
            .map_err(store_error_to_listkeeper)?
            .ok_or_else(|| ListKeeperError::not_found(format!("list {id} not found")))?;

        let todos = self
            .store
            .select_todos_by_list_id(id)
            .await
            .map_err(store_error_to_listkeeper)?;

        Ok(ListWithTodos { list, todos })
    }

    /// `PUT /lists/add`: create a list.
    pub async fn handle_create_list(
        &self,
        input: CreateListInput,
    ) -> Result<List, ListKeeperError> {
        let list = self
            .store
            .insert_list(&input.name, &input.description)
            .await
            .map_err(store_error_to_listkeeper)?;

        tracing::info!(list_id = %list.id, "created list");
        Ok(list)
    }

    /// `PUT /list/{id}/createTodo`: create a todo under an existing list.
    ///
    /// New todos always start as [`TodoStatus::Pending`], whatever the
    /// payload carried.
    pub async fn handle_create_todo(
        &self,
        list_id: ListId,
        input: CreateTodoInput,
    ) -> Result<Todo, ListKeeperError> {
        let todo = self
            .store
            .insert_todo(list_id, &input.description, TodoStatus::Pending)
            .await
            .map_err(store_error_to_listkeeper)?;

        tracing::info!(list_id = %list_id, todo_id = %todo.id, "created todo");
        Ok(todo)
    }

    /// `GET /todo/{id}`: one todo.
    pub async fn handle_get_todo(&self, id: TodoId) -> Result<Todo, ListKeeperError> {
        self.store
            .select_todo_by_id(id)
            .await
            .map_err(store_error_to_listkeeper)?
            .ok_or_else(|| ListKeeperError::not_found(format!("todo {id} not found")))
    }

    /// Whether the store answers queries.
    pub async fn health_check(&self) -> Result<(), ListKeeperError> {
        self.store.ping().await.map_err(store_error_to_listkeeper)
    }
}
