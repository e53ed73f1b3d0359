//! Filesystem adapter.
//!
//! The three operations a protocol bridge dispatches to: `readdir`,
//! `getattr` and `read`. Each has an async core returning [`FsResult`] and a
//! callback wrapper in the bridge's convention: status `0` plus payload on
//! success, `-ENOENT` on any failure, callback invoked exactly once.
//!
//! Requests share nothing but the backend and its entity registry, so any
//! number may be in flight at once. There are no retries and no timeouts
//! here; a backend that hangs hangs the request.

use std::sync::Arc;

use crate::attr::FileAttr;
use crate::error::{FsError, FsResult};
use crate::materialize::{FuseEntry, Materializer};
use crate::route::{ParamPolicy, Resolver, Route};
use crate::searcher::Searcher;

/// Suffix rejected by default, so version-control probes never hit the
/// backend.
pub const GIT_SUFFIX: &str = ".git";

/// Adapter options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsOptions {
    /// Parameter inference policy for search routes.
    pub params: ParamPolicy,
    /// Paths ending in any of these are always "no such entry".
    pub reserved_suffixes: Vec<String>,
}

impl Default for FsOptions {
    fn default() -> Self {
        Self {
            params: ParamPolicy::default(),
            reserved_suffixes: vec![GIT_SUFFIX.to_string()],
        }
    }
}

/// A directory listing split the way the bridge wants it.
///
/// `attrs` holds metadata only for entries that carried it, so it may be
/// shorter than `names` and is not index-aligned with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub names: Vec<String>,
    pub attrs: Vec<FileAttr>,
}

impl FromIterator<FuseEntry> for Listing {
    fn from_iter<I: IntoIterator<Item = FuseEntry>>(iter: I) -> Self {
        let mut listing = Listing::default();
        for entry in iter {
            listing.names.push(entry.name);
            if let Some(attr) = entry.attr {
                listing.attrs.push(attr);
            }
        }
        listing
    }
}

/// Exposes a [`Searcher`] as a read-only filesystem.
pub struct SearchFs<S> {
    searcher: Arc<S>,
    options: FsOptions,
}

impl<S> std::fmt::Debug for SearchFs<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFs")
            .field("searcher", &"<dyn Searcher>")
            .field("options", &self.options)
            .finish()
    }
}

impl<S> Clone for SearchFs<S> {
    fn clone(&self) -> Self {
        Self {
            searcher: Arc::clone(&self.searcher),
            options: self.options.clone(),
        }
    }
}

impl<S: Searcher> SearchFs<S> {
    pub fn new(searcher: S) -> Self {
        Self::from_arc(Arc::new(searcher))
    }

    /// Wrap a backend that is shared with other owners.
    pub fn from_arc(searcher: Arc<S>) -> Self {
        Self {
            searcher,
            options: FsOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FsOptions) -> Self {
        self.options = options;
        self
    }

    pub fn searcher(&self) -> &Arc<S> {
        &self.searcher
    }

    /// Returns true if `path` ends in a reserved suffix.
    pub fn is_reserved(&self, path: &str) -> bool {
        let trimmed = path.trim_end_matches('/');
        self.options
            .reserved_suffixes
            .iter()
            .any(|suffix| trimmed.ends_with(suffix.as_str()))
    }

    /// Classify `path` against the backend's entities.
    pub fn route(&self, path: &str) -> Option<Route> {
        Resolver::new(self.searcher.entities())
            .with_policy(self.options.params)
            .resolve(path)
    }

    fn checked_route(&self, path: &str) -> FsResult<Route> {
        if self.is_reserved(path) {
            return Err(FsError::reserved(path));
        }
        self.route(path).ok_or_else(|| FsError::unresolvable(path))
    }

    // ========================================================================
    // Async core
    // ========================================================================

    /// List the directory at `path`. A property file lists as empty.
    pub async fn list(&self, path: &str) -> FsResult<Listing> {
        let route = self.checked_route(path)?;
        let entries = Materializer::new(self.searcher.as_ref())
            .materialize(&route)
            .await
            .map_err(|e| FsError::search(path, e))?;

        tracing::debug!(path, route = %route.kind(), entries = entries.len(), "listed");
        Ok(entries.into_iter().collect())
    }

    /// Attributes of the entry at `path`.
    ///
    /// Directories report [`DIRECTORY_SIZE`](crate::attr::DIRECTORY_SIZE).
    /// Property files report the byte length of the backend's rendering of
    /// the property, or zero if it has none.
    pub async fn stat(&self, path: &str) -> FsResult<FileAttr> {
        match self.checked_route(path)? {
            Route::Root | Route::Search { .. } | Route::Result { .. } => Ok(FileAttr::directory()),
            Route::ResultProperty {
                entity,
                key,
                property,
            } => {
                let rendered = self
                    .searcher
                    .property(&entity, &key, &property)
                    .await
                    .map_err(|e| FsError::search(path, e))?;
                let size = rendered.map_or(0, |value| value.len() as u64);
                Ok(FileAttr::file(size))
            }
        }
    }

    /// Read up to `length` bytes into `buf`. Nothing in the tree has
    /// content: always 0 bytes.
    pub fn read_at(&self, path: &str, _buf: &mut [u8], length: usize, position: u64) -> usize {
        tracing::trace!(path, length, position, "read");
        0
    }

    // ========================================================================
    // Bridge callbacks
    // ========================================================================

    /// `readdir`: `cb(0, names, attrs)` or `cb(-ENOENT, [], [])`.
    pub async fn readdir<F>(&self, path: &str, cb: F)
    where
        F: FnOnce(i32, Vec<String>, Vec<FileAttr>),
    {
        match self.list(path).await {
            Ok(listing) => cb(0, listing.names, listing.attrs),
            Err(e) => {
                log_failure("readdir", path, &e);
                cb(e.status(), Vec::new(), Vec::new())
            }
        }
    }

    /// `getattr`: `cb(0, Some(attr))` or `cb(-ENOENT, None)`.
    pub async fn getattr<F>(&self, path: &str, cb: F)
    where
        F: FnOnce(i32, Option<FileAttr>),
    {
        match self.stat(path).await {
            Ok(attr) => cb(0, Some(attr)),
            Err(e) => {
                log_failure("getattr", path, &e);
                cb(e.status(), None)
            }
        }
    }

    /// `read`: `cb(bytes_read)`, which is always 0.
    pub fn read<F>(
        &self,
        path: &str,
        _fd: u64,
        buf: &mut [u8],
        length: usize,
        position: u64,
        cb: F,
    ) where
        F: FnOnce(usize),
    {
        cb(self.read_at(path, buf, length, position))
    }
}

/// Backend failures are worth a warning; missing paths are routine.
fn log_failure(op: &str, path: &str, error: &FsError) {
    match error {
        FsError::Search { source, .. } => {
            tracing::warn!(op, path, error = %source, "search backend failed");
        }
        other => tracing::debug!(op, path, error = %other, "no such entry"),
    }
}
