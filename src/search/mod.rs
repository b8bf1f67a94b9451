//! In-memory resource search and ranking
//!
//! This module answers free-text and structured queries over a catalog of
//! cloud resources:
//!
//! - **Query parsing**: plain terms, `key:value` filters (`type:`, `location:`,
//!   `rg:`, `tag:`, `name:`), `*` / `?` wildcards
//! - **Filtering**: location, resource group, tags, excluded types, and type
//!   filters with short aliases such as `vm` or `aks`
//! - **Ranking**: a deterministic score per (field, term) match
//! - **Suggestions**: prefix autocomplete over names, locations, type
//!   suffixes and tag keys
//!
//! # Architecture
//!
//! ```text
//! raw query ──► SearchQuery::parse ──► FilterMatcher ──► TextMatcher ──► scoring
//!                                        (per resource)   (per field)       │
//!                                                                           ▼
//!                                               SearchEngine::search ◄── stable sort
//! ```
//!
//! # Example
//!
//! ```
//! use resource_search::models::Resource;
//! use resource_search::search::{MatchType, SearchConfig, SearchEngine};
//!
//! let mut engine = SearchEngine::new(SearchConfig::default()).unwrap();
//! engine.set_catalog(vec![
//!     Resource::new("1", "web-server-vm", "Microsoft.Compute/virtualMachines")
//!         .with_location("eastus"),
//! ]);
//!
//! let results = engine.search("type:vm web");
//! assert_eq!(results[0].match_type, MatchType::Name);
//! assert_eq!(engine.suggestions("we"), vec!["web-server-vm"]);
//! ```

mod config;
mod error;
mod filter;
mod matcher;
mod query;
mod scoring;
mod service;
mod suggest;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Result, SearchError};
pub use filter::{FilterMatcher, TypeAliases};
pub use matcher::{TextMatcher, WildcardMode};
pub use query::{has_wildcard, BooleanKeyword, SearchFilters, SearchQuery};
pub use scoring::{score, MatchType};
pub use service::{SearchEngine, SearchResult, SharedSearchEngine};
pub use suggest::SuggestionIndex;
