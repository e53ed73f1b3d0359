//! Search capability trait.
//!
//! A backend answers two questions: "what matches this query?" and "what is
//! inside this result?". Everything the mounted tree shows comes from these
//! answers; nothing is cached between calls.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SearchResult;
use crate::registry::EntityRegistry;
use crate::route::SearchParams;

/// A search backend exposed as a filesystem.
///
/// Implementations must be safe to call concurrently for distinct requests.
/// A backend that is not should serialize internally.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Entities this backend understands, fixed at construction.
    fn entities(&self) -> &EntityRegistry;

    /// List values of `entity` matching every filter in `params`.
    async fn search(
        &self,
        entity: Option<&str>,
        params: &SearchParams,
    ) -> SearchResult<Vec<String>>;

    /// List the contents of the result `key` of `entity`.
    async fn get_entity(&self, entity: &str, key: &str) -> SearchResult<Vec<String>>;

    /// Render one property of a result, if the backend can.
    ///
    /// Only used to size property files. Defaults to no rendering.
    async fn property(
        &self,
        _entity: &str,
        _key: &str,
        _property: &str,
    ) -> SearchResult<Option<String>> {
        Ok(None)
    }
}

#[async_trait]
impl<S: Searcher + ?Sized> Searcher for Arc<S> {
    fn entities(&self) -> &EntityRegistry {
        (**self).entities()
    }

    async fn search(
        &self,
        entity: Option<&str>,
        params: &SearchParams,
    ) -> SearchResult<Vec<String>> {
        (**self).search(entity, params).await
    }

    async fn get_entity(&self, entity: &str, key: &str) -> SearchResult<Vec<String>> {
        (**self).get_entity(entity, key).await
    }

    async fn property(
        &self,
        entity: &str,
        key: &str,
        property: &str,
    ) -> SearchResult<Option<String>> {
        (**self).property(entity, key, property).await
    }
}

#[async_trait]
impl<S: Searcher + ?Sized> Searcher for Box<S> {
    fn entities(&self) -> &EntityRegistry {
        (**self).entities()
    }

    async fn search(
        &self,
        entity: Option<&str>,
        params: &SearchParams,
    ) -> SearchResult<Vec<String>> {
        (**self).search(entity, params).await
    }

    async fn get_entity(&self, entity: &str, key: &str) -> SearchResult<Vec<String>> {
        (**self).get_entity(entity, key).await
    }

    async fn property(
        &self,
        entity: &str,
        key: &str,
        property: &str,
    ) -> SearchResult<Option<String>> {
        (**self).property(entity, key, property).await
    }
}
