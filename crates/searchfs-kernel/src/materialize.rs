//! Route → directory entries.

use tracing::Instrument;

use crate::attr::FileAttr;
use crate::error::SearchResult;
use crate::route::Route;
use crate::searcher::Searcher;

/// One name in a directory listing, with metadata if known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseEntry {
    pub name: String,
    pub attr: Option<FileAttr>,
}

impl FuseEntry {
    /// Entry whose metadata is left to `getattr`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr: None,
        }
    }

    pub fn with_attr(name: impl Into<String>, attr: FileAttr) -> Self {
        Self {
            name: name.into(),
            attr: Some(attr),
        }
    }
}

/// Turns resolved routes into entries by asking the search backend.
#[derive(Debug)]
pub struct Materializer<'a, S: ?Sized> {
    searcher: &'a S,
}

impl<'a, S: Searcher + ?Sized> Materializer<'a, S> {
    pub fn new(searcher: &'a S) -> Self {
        Self { searcher }
    }

    /// List the directory for `route`.
    ///
    /// A backend failure fails the whole listing; no partial results.
    pub async fn materialize(&self, route: &Route) -> SearchResult<Vec<FuseEntry>> {
        match route {
            Route::Root => Ok(self
                .searcher
                .entities()
                .iter()
                .map(|name| FuseEntry::with_attr(name, FileAttr::directory()))
                .collect()),
            Route::Search { entity, params } => {
                let span = tracing::debug_span!("search", entity = ?entity, params = params.len());
                let names = self
                    .searcher
                    .search(entity.as_deref(), params)
                    .instrument(span)
                    .await?;
                Ok(names.into_iter().map(FuseEntry::new).collect())
            }
            Route::Result { entity, key } => {
                let span = tracing::debug_span!("get_entity", %entity, %key);
                let names = self
                    .searcher
                    .get_entity(entity, key)
                    .instrument(span)
                    .await?;
                Ok(names.into_iter().map(FuseEntry::new).collect())
            }
            // Property files have no listing.
            Route::ResultProperty { .. } => Ok(Vec::new()),
        }
    }
}
