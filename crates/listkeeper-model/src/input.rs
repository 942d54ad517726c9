//! Request payloads for the create operations.
//!
//! Both payloads reject unknown fields so that typos such as `"nmae"` fail
//! loudly instead of creating a record with an empty name.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// Body of `PUT /lists/add`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListInput {
    /// The list name. Required and non-empty.
    pub name: String,

    /// The list description. Defaults to empty.
    #[serde(default)]
    pub description: String,
}

impl CreateListInput {
    /// Check field-level constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_owned());
        }
        Ok(())
    }
}

/// Body of `PUT /list/{id}/createTodo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoInput {
    /// What needs doing. Required and non-empty.
    pub description: String,

    /// Accepted for compatibility with clients that echo a full todo; new
    /// todos always start as `PENDING`.
    #[serde(default)]
    pub status: Option<IgnoredAny>,
}

impl CreateTodoInput {
    /// Check field-level constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_owned());
        }
        Ok(())
    }
}
