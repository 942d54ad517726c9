//! SQLite-backed storage for lists and todos.
//!
//! Every statement binds caller-supplied values as parameters; no user input
//! is ever formatted into SQL text. The pool is owned by `sqlx` and is safe
//! to share between concurrent requests.

use std::str::FromStr;
use std::time::Instant;

use sqlx::Row;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};

use listkeeper_model::types::{List, ListId, Todo, TodoId, TodoStatus};

/// Errors returned by [`ListStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The driver reported a failure (connectivity, constraint, I/O).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A todo was created under a list that does not exist.
    #[error("list {0} not found")]
    ListNotFound(ListId),

    /// A persisted row holds a value the model cannot represent.
    #[error("corrupt row in {table}: {reason}")]
    CorruptRow {
        /// Table the row was read from.
        table: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Idempotent bootstrap schema, applied in order on every open.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS lists (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS todos (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        status      TEXT NOT NULL DEFAULT 'PENDING',
        list_id     INTEGER NOT NULL REFERENCES lists(id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_todos_list_id ON todos(list_id)",
];

/// Handle to the relational store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct ListStore {
    pool: SqlitePool,
}

impl ListStore {
    /// Open (creating if missing) the database at `url` and apply the schema.
    pub async fn open(url: &str, max_connections: u32) -> StoreResult<Self> {
        let started_at = Instant::now();
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        tracing::info!(
            url,
            max_connections,
            duration_ms = started_at.elapsed().as_millis(),
            "opened store",
        );
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every SQLite in-memory connection is its own database.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Check that a connection can be acquired and answers a trivial query.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a list and return it with its assigned id.
    pub async fn insert_list(&self, name: &str, description: &str) -> StoreResult<List> {
        let row = sqlx::query(
            "INSERT INTO lists (name, description)
             VALUES (?1, ?2)
             RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        list_from_row(&row)
    }

    /// Insert a todo under `list_id` and return it with its assigned id.
    ///
    /// The list existence check and the insert are one statement, so a
    /// concurrent writer cannot slip in between them.
    pub async fn insert_todo(
        &self,
        list_id: ListId,
        description: &str,
        status: TodoStatus,
    ) -> StoreResult<Todo> {
        let row = sqlx::query(
            "INSERT INTO todos (description, status, list_id)
             SELECT ?1, ?2, id FROM lists WHERE id = ?3
             RETURNING id, description, status, list_id",
        )
        .bind(description)
        .bind(status.as_str())
        .bind(list_id.get())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => todo_from_row(&row),
            None => Err(StoreError::ListNotFound(list_id)),
        }
    }

    /// Fetch one list.
    pub async fn select_list_by_id(&self, id: ListId) -> StoreResult<Option<List>> {
        let row = sqlx::query("SELECT id, name, description FROM lists WHERE id = ?1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(list_from_row).transpose()
    }

    /// Fetch every todo of a list, oldest first.
    pub async fn select_todos_by_list_id(&self, list_id: ListId) -> StoreResult<Vec<Todo>> {
        let rows = sqlx::query(
            "SELECT id, description, status, list_id
             FROM todos
             WHERE list_id = ?1
             ORDER BY id ASC",
        )
        .bind(list_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(todo_from_row).collect()
    }

    /// Fetch every list, oldest first.
    pub async fn select_all_lists(&self) -> StoreResult<Vec<List>> {
        let rows = sqlx::query("SELECT id, name, description FROM lists ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(list_from_row).collect()
    }

    /// Fetch one todo.
    pub async fn select_todo_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let row = sqlx::query("SELECT id, description, status, list_id FROM todos WHERE id = ?1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(todo_from_row).transpose()
    }
}

fn list_from_row(row: &SqliteRow) -> StoreResult<List> {
    Ok(List {
        id: ListId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

fn todo_from_row(row: &SqliteRow) -> StoreResult<Todo> {
    let status: String = row.try_get("status")?;
    let status = TodoStatus::from_str(&status).map_err(|reason| StoreError::CorruptRow {
        table: "todos",
        reason,
    })?;

    Ok(Todo {
        id: TodoId::new(row.try_get("id")?),
        description: row.try_get("description")?,
        status,
        list_id: ListId::new(row.try_get("list_id")?),
    })
}
