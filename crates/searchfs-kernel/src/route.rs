//! Path → route classification.
//!
//! A path is read as a sequence of non-empty segments. The rightmost segment
//! naming a registered entity decides what the directory is:
//!
//! ```text
//! /                          → Root
//! /…/tags                    → Search   (entity at distance 0 from the end)
//! /…/tags/Fantasy            → Result   (distance 1)
//! /…/tags/Fantasy/Storm Front→ ResultProperty (distance 2)
//! /foo/bar                   → unresolvable
//! ```
//!
//! Entity names further left only feed the search parameters: every
//! `entity/value` pair met while sweeping the path left to right becomes a
//! filter value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::registry::EntityRegistry;

/// Filter values keyed by entity, both in path order. Duplicates are kept.
pub type SearchParams = IndexMap<String, Vec<String>>;

/// Semantic kind of a directory path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Route {
    /// The mount root; lists every registered entity.
    Root,
    /// A search listing for `entity`, filtered by `params`.
    Search {
        entity: Option<String>,
        params: SearchParams,
    },
    /// A single result of an entity, identified by `key`.
    Result { entity: String, key: String },
    /// A named property inside a result. Classified as a file.
    ResultProperty {
        entity: String,
        key: String,
        property: String,
    },
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Root => RouteKind::Root,
            Route::Search { .. } => RouteKind::Search,
            Route::Result { .. } => RouteKind::Result,
            Route::ResultProperty { .. } => RouteKind::ResultProperty,
        }
    }
}

/// Tag-only view of [`Route`], for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RouteKind {
    Root,
    Search,
    Result,
    ResultProperty,
}

/// Whether the last segment of a path takes part in parameter inference.
///
/// For a `Search` route both policies produce the same parameters: the
/// terminal segment is the entity being listed and has no value after it.
/// They differ only when [`compute_params`] is applied to an arbitrary
/// segment sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamPolicy {
    /// Sweep every segment.
    #[default]
    IncludeTerminal,
    /// Sweep every segment except the last.
    ExcludeTerminal,
}

/// Split a path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Build search parameters from a segment sequence.
///
/// Sweeps left to right pairing each entity segment with the segment after
/// it, unless that segment is itself an entity or was already used as the
/// value of the previous pair.
pub fn compute_params(
    segments: &[&str],
    registry: &EntityRegistry,
    policy: ParamPolicy,
) -> SearchParams {
    let swept = match policy {
        ParamPolicy::IncludeTerminal => segments,
        ParamPolicy::ExcludeTerminal => &segments[..segments.len().saturating_sub(1)],
    };

    let (params, _consumed) = swept.iter().enumerate().fold(
        (SearchParams::new(), false),
        |(mut params, consumed), (i, &candidate)| match swept.get(i + 1) {
            Some(&value)
                if !consumed && registry.contains(candidate) && !registry.contains(value) =>
            {
                params
                    .entry(candidate.to_string())
                    .or_default()
                    .push(value.to_string());
                (params, true)
            }
            _ => (params, false),
        },
    );

    params
}

/// Classifies paths against a borrowed entity registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a EntityRegistry,
    policy: ParamPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a EntityRegistry) -> Self {
        Self {
            registry,
            policy: ParamPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ParamPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classify `path`, or `None` if no entity sits within two segments of
    /// its end.
    pub fn resolve(&self, path: &str) -> Option<Route> {
        let segments = split_path(path);
        if segments.is_empty() {
            return Some(Route::Root);
        }

        let last = segments.len() - 1;
        // Any entity left of the rightmost one is further from the end, so
        // the rightmost match alone decides the route.
        let i = segments
            .iter()
            .rposition(|segment| self.registry.contains(segment))?;

        let route = match last - i {
            0 => Route::Search {
                entity: Some(segments[i].to_string()),
                params: compute_params(&segments, self.registry, self.policy),
            },
            1 => Route::Result {
                entity: segments[i].to_string(),
                key: segments[i + 1].to_string(),
            },
            2 => Route::ResultProperty {
                entity: segments[i].to_string(),
                key: segments[i + 1].to_string(),
                property: segments[i + 2].to_string(),
            },
            _ => return None,
        };
        Some(route)
    }
}

/// Classify `path` with the default parameter policy.
pub fn resolve(path: &str, registry: &EntityRegistry) -> Option<Route> {
    Resolver::new(registry).resolve(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> EntityRegistry {
        EntityRegistry::new(["books", "tags", "author"])
    }

    fn params(pairs: &[(&str, &[&str])]) -> SearchParams {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_split_path_discards_empty_segments() {
        assert_eq!(split_path("//tags///Fantasy/"), vec!["tags", "Fantasy"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_root() {
        let registry = books();
        assert_eq!(resolve("/", &registry), Some(Route::Root));
        assert_eq!(resolve("", &registry), Some(Route::Root));
        assert_eq!(resolve("///", &registry), Some(Route::Root));
    }

    #[test]
    fn test_search_at_entity() {
        let route = resolve("/books", &books()).unwrap();
        assert_eq!(
            route,
            Route::Search {
                entity: Some("books".into()),
                params: SearchParams::new(),
            }
        );
        assert_eq!(route.kind(), RouteKind::Search);
    }

    #[test]
    fn test_result_one_below_entity() {
        let route = resolve("/tags/Fantasy/", &books()).unwrap();
        assert_eq!(
            route,
            Route::Result {
                entity: "tags".into(),
                key: "Fantasy".into(),
            }
        );
    }

    #[test]
    fn test_result_property_two_below_entity() {
        let route = resolve("/tags/Fantasy/Storm Front", &books()).unwrap();
        assert_eq!(
            route,
            Route::ResultProperty {
                entity: "tags".into(),
                key: "Fantasy".into(),
                property: "Storm Front".into(),
            }
        );
    }

    #[test]
    fn test_too_deep_is_unresolvable() {
        assert_eq!(resolve("/tags/Fantasy/a/b", &books()), None);
        assert_eq!(resolve("/books/x/y/z/w", &books()), None);
    }

    #[test]
    fn test_no_entity_is_unresolvable() {
        assert_eq!(resolve("/foo/bar", &books()), None);
        assert_eq!(resolve("/e", &EntityRegistry::new(["a", "b", "c", "d"])), None);
    }

    #[test]
    fn test_empty_registry() {
        let registry = EntityRegistry::default();
        assert_eq!(resolve("/", &registry), Some(Route::Root));
        assert_eq!(resolve("/books", &registry), None);
        assert_eq!(resolve("/a/b/c", &registry), None);
    }

    #[test]
    fn test_rightmost_entity_wins() {
        // "author" is the rightmost entity, one from the end.
        let route = resolve("/tags/Fantasy/author/Pratchett", &books()).unwrap();
        assert_eq!(
            route,
            Route::Result {
                entity: "author".into(),
                key: "Pratchett".into(),
            }
        );
    }

    #[test]
    fn test_far_entity_does_not_route() {
        // Entity four segments from the end contributes nothing to routing.
        assert_eq!(resolve("/tags/a/b/c/d", &books()), None);
    }

    #[test]
    fn test_nested_search_collects_params() {
        let route = resolve("/tags/Fantasy/author/Pratchett/books", &books()).unwrap();
        assert_eq!(
            route,
            Route::Search {
                entity: Some("books".into()),
                params: params(&[("tags", &["Fantasy"]), ("author", &["Pratchett"])]),
            }
        );
    }

    #[test]
    fn test_params_preserve_path_order() {
        let registry = books();
        let p = compute_params(
            &split_path("/tags/Fantasy/author/Pratchett"),
            &registry,
            ParamPolicy::IncludeTerminal,
        );
        assert_eq!(p, params(&[("tags", &["Fantasy"]), ("author", &["Pratchett"])]));
        let keys: Vec<_> = p.keys().collect();
        assert_eq!(keys, vec!["tags", "author"]);

        let p = compute_params(
            &split_path("/author/Pratchett/tags/Fantasy"),
            &registry,
            ParamPolicy::IncludeTerminal,
        );
        let keys: Vec<_> = p.keys().collect();
        assert_eq!(keys, vec!["author", "tags"]);
    }

    #[test]
    fn test_params_keep_duplicates() {
        let p = compute_params(
            &split_path("/tags/Fantasy/tags/Fantasy/tags/Discworld/books"),
            &books(),
            ParamPolicy::IncludeTerminal,
        );
        assert_eq!(p, params(&[("tags", &["Fantasy", "Fantasy", "Discworld"])]));
    }

    #[test]
    fn test_entity_followed_by_entity_is_nesting() {
        let p = compute_params(
            &split_path("/tags/author/Pratchett"),
            &books(),
            ParamPolicy::IncludeTerminal,
        );
        assert_eq!(p, params(&[("author", &["Pratchett"])]));
    }

    #[test]
    fn test_value_segments_never_pair() {
        let registry = EntityRegistry::new(["author", "tags"]);
        let p = compute_params(
            &["author", "Pratchett", "tags", "x"],
            &registry,
            ParamPolicy::IncludeTerminal,
        );
        assert_eq!(p, params(&[("author", &["Pratchett"]), ("tags", &["x"])]));

        let p = compute_params(&["books", "a", "b"], &books(), ParamPolicy::IncludeTerminal);
        assert_eq!(p, params(&[("books", &["a"])]));
    }

    #[test]
    fn test_terminal_policy_on_bare_sequence() {
        let registry = books();
        let segments = ["tags", "Fantasy"];

        let include = compute_params(&segments, &registry, ParamPolicy::IncludeTerminal);
        assert_eq!(include, params(&[("tags", &["Fantasy"])]));

        let exclude = compute_params(&segments, &registry, ParamPolicy::ExcludeTerminal);
        assert!(exclude.is_empty());
    }

    #[test]
    fn test_terminal_policy_agrees_for_search_routes() {
        let registry = books();
        for path in [
            "/books",
            "/tags/Fantasy/books",
            "/tags/Fantasy/author/Pratchett/books",
            "/tags/author",
            "/x/y/tags/Fantasy/tags",
        ] {
            let include = Resolver::new(&registry)
                .with_policy(ParamPolicy::IncludeTerminal)
                .resolve(path);
            let exclude = Resolver::new(&registry)
                .with_policy(ParamPolicy::ExcludeTerminal)
                .resolve(path);
            assert_eq!(include, exclude, "policies disagree on {path}");
            assert_eq!(include.map(|r| r.kind()), Some(RouteKind::Search));
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let registry = books();
        for path in ["/", "/tags", "/tags/Fantasy", "/tags/Fantasy/x", "/nope"] {
            assert_eq!(resolve(path, &registry), resolve(path, &registry));
        }
    }

    #[test]
    fn test_route_kind_names() {
        assert_eq!(RouteKind::ResultProperty.to_string(), "result_property");
        assert_eq!("search".parse::<RouteKind>().unwrap(), RouteKind::Search);
    }
}
