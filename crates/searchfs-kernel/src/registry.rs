//! Entity registry.
//!
//! The fixed, ordered set of entity names a search backend understands.
//! Order only matters for the root listing; resolution uses membership.

use std::collections::HashSet;

/// Ordered, deduplicated set of entity names.
///
/// Built once when the backend is constructed and never mutated, so it can
/// be shared across in-flight requests without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    names: Vec<String>,
    index: HashSet<String>,
}

impl EntityRegistry {
    /// Create a registry, keeping the first occurrence of each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for name in names {
            let name = name.into();
            if registry.index.insert(name.clone()) {
                registry.names.push(name);
            }
        }
        registry
    }

    /// Returns true if `name` is a registered entity.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Iterate entity names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EntityRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let registry = EntityRegistry::new(["books", "tags", "author"]);
        let names: Vec<_> = registry.iter().collect();
        assert_eq!(names, vec!["books", "tags", "author"]);
    }

    #[test]
    fn test_drops_duplicates() {
        let registry = EntityRegistry::new(["a", "b", "a", "c", "b"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_membership() {
        let registry: EntityRegistry = ["books", "tags"].into_iter().collect();
        assert!(registry.contains("books"));
        assert!(!registry.contains("Books"));
        assert!(!registry.contains(""));
    }

    #[test]
    fn test_empty() {
        let registry = EntityRegistry::new(Vec::<String>::new());
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
