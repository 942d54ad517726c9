//! ListKeeper request router.
//!
//! Routing is a lookup in a small declarative table of
//! `(method, resource root, path shape)` entries. The path is parsed
//! structurally: the first segment names the resource root, the remainder is
//! split on `/` into an identifier and an optional sub-action.
//!
//! ```text
//! GET /lists/                 -> ListAll
//! PUT /lists/add              -> CreateList
//! GET /list/{id}              -> GetList
//! PUT /list/{id}/createTodo   -> CreateTodo
//! GET /todo/{id}              -> GetTodo
//! ```
//!
//! Identifiers are parsed into their typed form here, so handlers only ever
//! see a valid [`ListId`] or [`TodoId`].

use http::Method;

use listkeeper_model::error::ListKeeperError;
use listkeeper_model::operations::{ListKeeperOperation, OperationKind};
use listkeeper_model::types::{ListId, TodoId};

/// Shape of the path below a resource root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// The remainder must equal this literal. A missing remainder counts as `""`.
    Exact(&'static str),
    /// `{id}` and nothing after it.
    Id,
    /// `{id}/{action}` with the given action keyword.
    IdAction(&'static str),
}

/// One entry of the route table.
#[derive(Debug)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// First path segment.
    pub root: &'static str,
    /// Shape of the remaining segments.
    pub shape: Shape,
    /// The operation served by this route.
    pub kind: OperationKind,
}

/// The route table.
pub static ROUTES: [Route; 5] = [
    Route {
        method: Method::GET,
        root: "lists",
        shape: Shape::Exact(""),
        kind: OperationKind::ListAll,
    },
    Route {
        method: Method::PUT,
        root: "lists",
        shape: Shape::Exact("add"),
        kind: OperationKind::CreateList,
    },
    Route {
        method: Method::GET,
        root: "list",
        shape: Shape::Id,
        kind: OperationKind::GetList,
    },
    Route {
        method: Method::PUT,
        root: "list",
        shape: Shape::IdAction("createTodo"),
        kind: OperationKind::CreateTodo,
    },
    Route {
        method: Method::GET,
        root: "todo",
        shape: Shape::Id,
        kind: OperationKind::GetTodo,
    },
];

/// A request path split into its resource root and remaining segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// The resource root, e.g. `list`.
    pub root: &'a str,
    /// Everything after `/{root}/`, if a separator was present.
    pub rest: Option<&'a str>,
}

impl<'a> PathParts<'a> {
    /// Split a request path. Never fails; empty segments are kept as `""`.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        match trimmed.split_once('/') {
            Some((root, rest)) => Self {
                root,
                rest: Some(rest),
            },
            None => Self {
                root: trimmed,
                rest: None,
            },
        }
    }

    fn segments(&self) -> Vec<&'a str> {
        self.rest.map(|rest| rest.split('/').collect()).unwrap_or_default()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ShapeMatch<'a> {
    Matched(Option<&'a str>),
    MissingSegment(&'static str),
    NoMatch,
}

impl Shape {
    fn matches<'a>(self, parts: &PathParts<'a>) -> ShapeMatch<'a> {
        match self {
            Self::Exact(literal) => {
                if parts.rest.unwrap_or("") == literal {
                    ShapeMatch::Matched(None)
                } else {
                    ShapeMatch::NoMatch
                }
            }
            Self::Id => {
                let segments = parts.segments();
                match segments.as_slice() {
                    [] | [""] => ShapeMatch::MissingSegment("id"),
                    [id] => ShapeMatch::Matched(Some(*id)),
                    _ => ShapeMatch::NoMatch,
                }
            }
            Self::IdAction(action) => {
                let segments = parts.segments();
                match segments.as_slice() {
                    [] | [_] | [_, ""] => ShapeMatch::MissingSegment("action"),
                    [id, found] if *found == action => {
                        if id.is_empty() {
                            ShapeMatch::MissingSegment("id")
                        } else {
                            ShapeMatch::Matched(Some(*id))
                        }
                    }
                    _ => ShapeMatch::NoMatch,
                }
            }
        }
    }
}

/// Resolve a method and path into a fully typed operation.
///
/// # Errors
///
/// - `NotFound` when no route matches the method and path.
/// - `InvalidInput` when a route matches but an expected segment is missing
///   or the identifier is not a valid id.
pub fn resolve_operation(
    method: &Method,
    path: &str,
) -> Result<ListKeeperOperation, ListKeeperError> {
    let parts = PathParts::parse(path);
    let mut missing = None;

    for route in ROUTES
        .iter()
        .filter(|route| route.root == parts.root && route.method == *method)
    {
        match route.shape.matches(&parts) {
            ShapeMatch::Matched(id) => return build_operation(route.kind, id),
            ShapeMatch::MissingSegment(segment) => {
                missing.get_or_insert(segment);
            }
            ShapeMatch::NoMatch => {}
        }
    }

    Err(match missing {
        Some(segment) => ListKeeperError::invalid_input(format!("missing {segment} in path")),
        None => ListKeeperError::no_route(method, path),
    })
}

fn build_operation(
    kind: OperationKind,
    id: Option<&str>,
) -> Result<ListKeeperOperation, ListKeeperError> {
    let raw = id.unwrap_or_default();
    let op = match kind {
        OperationKind::ListAll => ListKeeperOperation::ListAll,
        OperationKind::CreateList => ListKeeperOperation::CreateList,
        OperationKind::GetList => ListKeeperOperation::GetList {
            id: parse_id::<ListId>(raw)?,
        },
        OperationKind::CreateTodo => ListKeeperOperation::CreateTodo {
            list_id: parse_id::<ListId>(raw)?,
        },
        OperationKind::GetTodo => ListKeeperOperation::GetTodo {
            id: parse_id::<TodoId>(raw)?,
        },
    };
    Ok(op)
}

fn parse_id<T>(raw: &str) -> Result<T, ListKeeperError>
where
    T: std::str::FromStr<Err = listkeeper_model::types::InvalidId>,
{
    raw.parse()
        .map_err(|e| ListKeeperError::invalid_input("Invalid id").with_source(e))
}
