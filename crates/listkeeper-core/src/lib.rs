//! List and Todo business logic for ListKeeper.
//!
//! - [`store`]: parameterized SQLite statements over an `sqlx` pool
//! - [`provider`]: the list and todo resource operations
//! - [`handler`]: bridges the HTTP layer to the provider
#![allow(missing_docs, clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handler;
pub mod provider;
pub mod store;
