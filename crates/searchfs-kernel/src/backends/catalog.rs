//! In-memory record catalog.
//!
//! A list of records, each a map of field → one or many values. One entity
//! (the *record entity*, e.g. `books`) names the records themselves; every
//! other entity names a field (e.g. `tags`, `author`). With the sample
//! catalog mounted:
//!
//! ```text
//! /books                      → every title
//! /tags                       → every distinct tag
//! /tags/Fantasy/books         → titles tagged Fantasy
//! /tags/Fantasy               → titles tagged Fantasy (result listing)
//! /books/Storm Front          → the record's field names
//! /books/Storm Front/title    → file holding "Storm Front"
//! /books/Storm Front/author   → "Jim Butcher" (author is an entity: a search)
//! ```

use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};
use crate::registry::EntityRegistry;
use crate::route::SearchParams;
use crate::searcher::Searcher;

/// A field holding one value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    One(String),
    Many(Vec<String>),
}

impl FieldValue {
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::One(v) => std::slice::from_ref(v),
            FieldValue::Many(vs) => vs,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::One(v.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(vs: Vec<&str>) -> Self {
        FieldValue::Many(vs.into_iter().map(str::to_string).collect())
    }
}

/// One catalog record, fields in declaration order.
pub type Record = IndexMap<String, FieldValue>;

/// Catalog definition, as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Entities in root-listing order.
    pub entities: Vec<String>,
    /// Entity whose results are the records themselves.
    pub record_entity: String,
    /// Field holding a record's name.
    pub name_field: String,
    /// Entity → field overrides. Unlisted entities use the field of the
    /// same name.
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl CatalogConfig {
    /// A three-book catalog with `books`, `tags` and `author` entities.
    pub fn sample() -> Self {
        let book = |title: &str, author: &str, tags: Vec<&str>| -> Record {
            [
                ("title".to_string(), FieldValue::from(title)),
                ("author".to_string(), FieldValue::from(author)),
                ("tags".to_string(), FieldValue::from(tags)),
            ]
            .into_iter()
            .collect()
        };

        Self {
            entities: vec!["books".into(), "tags".into(), "author".into()],
            record_entity: "books".into(),
            name_field: "title".into(),
            fields: IndexMap::new(),
            records: vec![
                book("The Colour of Magic", "Terry Pratchett", vec!["Fantasy", "Discworld"]),
                book(
                    "Storm Front",
                    "Jim Butcher",
                    vec!["Urban Fantasy", "Fantasy", "Dresden Files"],
                ),
                book(
                    "All Systems Red",
                    "Martha Wells",
                    vec!["Science Fiction", "AI", "Robots"],
                ),
            ],
        }
    }
}

/// Backend searching an in-memory [`CatalogConfig`].
#[derive(Debug, Clone)]
pub struct CatalogSearcher {
    entities: EntityRegistry,
    config: CatalogConfig,
}

impl CatalogSearcher {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            entities: EntityRegistry::new(config.entities.iter().cloned()),
            config,
        }
    }

    pub fn sample() -> Self {
        Self::new(CatalogConfig::sample())
    }

    /// The record field an entity stands for.
    fn field_for<'a>(&'a self, entity: &'a str) -> SearchResult<&'a str> {
        if !self.entities.contains(entity) {
            return Err(SearchError::unknown_entity(entity));
        }
        if entity == self.config.record_entity {
            return Ok(self.config.name_field.as_str());
        }
        Ok(self
            .config
            .fields
            .get(entity)
            .map(String::as_str)
            .unwrap_or(entity))
    }

    fn name_of<'r>(&self, record: &'r Record) -> Option<&'r str> {
        record
            .get(&self.config.name_field)
            .and_then(|v| v.values().first())
            .map(String::as_str)
    }

    fn find(&self, name: &str) -> Option<&Record> {
        self.config
            .records
            .iter()
            .find(|r| self.name_of(r) == Some(name))
    }

    fn matches(&self, record: &Record, params: &SearchParams) -> SearchResult<bool> {
        for (entity, values) in params {
            let field = self.field_for(entity)?;
            let Some(value) = record.get(field) else {
                return Ok(false);
            };
            if !values.iter().all(|v| value.contains(v)) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn render(value: &FieldValue) -> String {
        let mut out = value.values().join("\n");
        out.push('\n');
        out
    }

    fn summarize(record: &Record) -> String {
        record
            .iter()
            .map(|(field, value)| format!("{field}: {}\n", value.values().join(", ")))
            .collect()
    }
}

#[async_trait]
impl Searcher for CatalogSearcher {
    fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    async fn search(
        &self,
        entity: Option<&str>,
        params: &SearchParams,
    ) -> SearchResult<Vec<String>> {
        let field = match entity {
            Some(entity) => self.field_for(entity)?,
            None => self.config.name_field.as_str(),
        };

        let mut found = IndexSet::new();
        for record in &self.config.records {
            if !self.matches(record, params)? {
                continue;
            }
            if let Some(value) = record.get(field) {
                found.extend(value.values().iter().cloned());
            }
        }
        Ok(found.into_iter().collect())
    }

    async fn get_entity(&self, entity: &str, key: &str) -> SearchResult<Vec<String>> {
        let field = self.field_for(entity)?;

        if entity == self.config.record_entity {
            return Ok(self
                .find(key)
                .map(|record| record.keys().cloned().collect())
                .unwrap_or_default());
        }

        Ok(self
            .config
            .records
            .iter()
            .filter(|r| r.get(field).is_some_and(|v| v.contains(key)))
            .filter_map(|r| self.name_of(r).map(str::to_string))
            .collect())
    }

    async fn property(
        &self,
        entity: &str,
        key: &str,
        property: &str,
    ) -> SearchResult<Option<String>> {
        let field = self.field_for(entity)?;

        if entity == self.config.record_entity {
            return Ok(self
                .find(key)
                .and_then(|record| record.get(property))
                .map(Self::render));
        }

        Ok(self
            .find(property)
            .filter(|record| record.get(field).is_some_and(|v| v.contains(key)))
            .map(Self::summarize))
    }
}
