//! Fixed-answer backend.
//!
//! Answers every query with the same names. Handy for smoke-testing a mount
//! and for exercising the adapter without real data.

use async_trait::async_trait;

use crate::error::SearchResult;
use crate::registry::EntityRegistry;
use crate::route::SearchParams;
use crate::searcher::Searcher;

/// Backend that returns `names` for every search and every result.
#[derive(Debug, Clone)]
pub struct FixedSearcher {
    entities: EntityRegistry,
    names: Vec<String>,
}

impl FixedSearcher {
    pub fn new<E, N>(entities: E, names: N) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            entities: EntityRegistry::new(entities),
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Searcher for FixedSearcher {
    fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    async fn search(
        &self,
        _entity: Option<&str>,
        _params: &SearchParams,
    ) -> SearchResult<Vec<String>> {
        Ok(self.names.clone())
    }

    async fn get_entity(&self, _entity: &str, _key: &str) -> SearchResult<Vec<String>> {
        Ok(self.names.clone())
    }
}
