//! Domain records and identifier types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a path segment is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidId {
    /// The raw segment that failed to parse.
    pub raw: String,
}

impl fmt::Display for InvalidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid id: {:?}", self.raw)
    }
}

impl std::error::Error for InvalidId {}

/// Parse a store-assigned identifier: one or more ASCII digits that fit in an `i64`.
///
/// Signs, whitespace and other decorations are rejected so that `"+7"` and
/// `"7"` cannot name the same row through different paths.
fn parse_id(raw: &str) -> Result<i64, InvalidId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidId {
            raw: raw.to_owned(),
        });
    }
    raw.parse().map_err(|_| InvalidId {
        raw: raw.to_owned(),
    })
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_id(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`List`], assigned by the store on insert.
    ListId
);

define_id!(
    /// Identifier of a [`Todo`], assigned by the store on insert.
    TodoId
);

/// Lifecycle state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TodoStatus {
    /// Newly created, not yet done.
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    /// Completed.
    #[serde(rename = "DONE")]
    Done,
}

impl TodoStatus {
    /// Returns the wire-format (and persisted) string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "DONE" => Ok(Self::Done),
            other => Err(format!("unknown todo status: {other}")),
        }
    }
}

/// A named container of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Store-assigned identifier.
    pub id: ListId,
    /// Display name, never empty.
    pub name: String,
    /// Free-form description, may be empty.
    pub description: String,
}

/// A task belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned identifier.
    pub id: TodoId,
    /// What needs doing, never empty.
    pub description: String,
    /// Current status.
    pub status: TodoStatus,
    /// The owning list.
    pub list_id: ListId,
}
