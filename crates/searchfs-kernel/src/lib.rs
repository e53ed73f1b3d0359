//! # searchfs-kernel
//!
//! Exposes a search backend as a navigable, read-only filesystem tree.
//!
//! Directory listings are search results and walking into directories
//! builds the query: `/tags/Fantasy/author/Pratchett/books` lists books
//! tagged Fantasy by Pratchett. Key components:
//!
//! - [`Searcher`] - the backend capability (`search`, `get_entity`)
//! - [`route`] - classifies a path as root, search, result or property
//! - [`Materializer`] - turns a route into directory entries
//! - [`SearchFs`] - the `readdir` / `getattr` / `read` surface a FUSE-style
//!   bridge dispatches to
//!
//! Every failure at the bridge boundary is `ENOENT`; the tree is derived
//! from live backend answers on every call and nothing persists.

pub mod adapter;
pub mod attr;
pub mod backends;
pub mod config;
mod error;
pub mod materialize;
pub mod registry;
pub mod route;
mod searcher;

pub use adapter::{FsOptions, Listing, SearchFs};
pub use attr::{DIRECTORY_SIZE, FileAttr, FileKind};
pub use backends::{CatalogConfig, CatalogSearcher, FixedSearcher};
pub use config::{BackendConfig, ConfigError, SearchFsConfig};
pub use error::{FsError, FsResult, SearchError, SearchResult};
pub use materialize::{FuseEntry, Materializer};
pub use registry::EntityRegistry;
pub use route::{ParamPolicy, Resolver, Route, RouteKind, SearchParams, resolve};
pub use searcher::Searcher;
