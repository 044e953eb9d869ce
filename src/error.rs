use std::path::PathBuf;

use thiserror::Error;

/// Rejected `#hex` color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3, 4, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Failure while loading or validating the category list.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed category json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node {id}: {source}")]
    Color {
        id: String,
        #[source]
        source: ColorError,
    },
    #[error("duplicate node id {0}")]
    DuplicateId(String),
    #[error("node {id} references missing parent {parent}")]
    MissingParent { id: String, parent: String },
    #[error("node {id} nests under subcategory {parent}; only two levels are allowed")]
    TooDeep { id: String, parent: String },
}

/// Illegal hierarchy transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown node {0}")]
    UnknownNode(String),
    #[error("{0} is a subcategory, not a top-level category")]
    NotACategory(String),
    #[error("{id} is not a subcategory of the active category")]
    NotAChild { id: String },
    #[error("cannot enter {wanted} from {from}")]
    WrongLevel {
        from: &'static str,
        wanted: &'static str,
    },
}
