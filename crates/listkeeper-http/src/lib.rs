//! HTTP service layer for ListKeeper.
//!
//! This crate turns raw HTTP requests into typed list/todo operations and
//! renders their results, providing:
//!
//! - **Router**: a declarative route table plus a structural path parser
//! - **Codec**: content-type checks and strict JSON decoding/encoding
//! - **Handler trait**: the boundary between HTTP and business logic
//! - **Service**: hyper `Service` implementation wiring it all together
//! - **Response helpers**: JSON success responses and the error envelope
#![allow(missing_docs)]

pub mod codec;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use dispatch::{ListKeeperHandler, NotImplementedHandler};
pub use response::ListKeeperResponseBody;
pub use service::{ListKeeperHttpConfig, ListKeeperHttpService};
