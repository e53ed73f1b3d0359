//! Error types.

use thiserror::Error;

/// Failure reported by a search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The backend does not know this entity.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The backend rejected or failed the query.
    #[error("backend error: {0}")]
    Backend(String),

    /// Other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SearchError {
    /// Create an UnknownEntity error.
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity(entity.into())
    }

    /// Create a Backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Search result type.
pub type SearchResult<T> = Result<T, SearchError>;

/// Filesystem adapter error.
///
/// The variants exist for logging. At the protocol boundary every one of
/// them is "no such entry".
#[derive(Debug, Error)]
pub enum FsError {
    /// No entity within two segments of the end of the path.
    #[error("unresolvable path: {0}")]
    Unresolvable(String),

    /// Path ends in a reserved suffix such as `.git`.
    #[error("reserved path: {0}")]
    Reserved(String),

    /// The search backend failed.
    #[error("search failed for {path}: {source}")]
    Search {
        path: String,
        #[source]
        source: SearchError,
    },
}

impl FsError {
    pub fn unresolvable(path: impl Into<String>) -> Self {
        Self::Unresolvable(path.into())
    }

    pub fn reserved(path: impl Into<String>) -> Self {
        Self::Reserved(path.into())
    }

    pub fn search(path: impl Into<String>, source: SearchError) -> Self {
        Self::Search {
            path: path.into(),
            source,
        }
    }

    /// Positive errno for this error. Always `ENOENT`.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::Unresolvable(_)
            | FsError::Reserved(_)
            | FsError::Search { .. } => libc::ENOENT,
        }
    }

    /// Callback status for this error (negated errno).
    pub fn status(&self) -> i32 {
        -self.errno()
    }
}

/// Filesystem result type.
pub type FsResult<T> = Result<T, FsError>;
