//! Search engine implementation

use crate::models::{Resource, ResourceSummary};
use crate::search::config::SearchConfig;
use crate::search::error::Result;
use crate::search::filter::{FilterMatcher, TypeAliases};
use crate::search::matcher::TextMatcher;
use crate::search::query::SearchQuery;
use crate::search::scoring::{self, MatchType};
use crate::search::suggest::SuggestionIndex;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// A single match of a query against one field of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identity of the matched resource (copied from the catalog)
    pub resource: ResourceSummary,

    /// Field category that matched
    pub match_type: MatchType,

    /// The query term that matched (empty for filter-only matches)
    pub matched_term: String,

    /// Full text of the matched field
    pub matched_text: String,

    /// Relevance score, never below 1
    pub score: i64,
}

/// In-memory search engine over a replaceable resource catalog.
///
/// `search` and `suggestions` only read the current snapshot; `set_catalog`
/// needs `&mut self`. Wrap the engine in [`SharedSearchEngine`] to refresh the
/// catalog while other threads search.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<[Resource]>,
    filter: FilterMatcher,
    matcher: TextMatcher,
    suggestions: SuggestionIndex,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create an engine with an empty catalog
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            catalog: Arc::from(Vec::new()),
            filter: FilterMatcher::new(TypeAliases::with_extra(&config.type_aliases)),
            matcher: TextMatcher::new(config.wildcard_mode),
            suggestions: SuggestionIndex::new(config.min_suggestion_chars, config.max_suggestions),
            config,
        })
    }

    /// Replace the whole catalog with a new snapshot
    pub fn set_catalog(&mut self, resources: impl Into<Arc<[Resource]>>) {
        self.catalog = resources.into();
        info!(resources = self.catalog.len(), "Search catalog replaced");
    }

    /// The current catalog snapshot
    pub fn catalog(&self) -> Arc<[Resource]> {
        Arc::clone(&self.catalog)
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Parse and run a query. Empty or whitespace-only input yields no results.
    pub fn search(&self, raw: &str) -> Vec<SearchResult> {
        if raw.trim().is_empty() {
            return Vec::new();
        }

        self.search_query(&SearchQuery::parse(raw))
    }

    /// Run an already parsed query.
    ///
    /// Results are sorted by descending score. The sort is stable, so equal
    /// scores keep catalog order, then field order (name, location, type,
    /// resource group, tags), then term order.
    pub fn search_query(&self, query: &SearchQuery) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let start_time = std::time::Instant::now();

        let mut filters = query.filters.clone();
        filters
            .excluded_types
            .extend(self.config.excluded_types.iter().cloned());

        let mut results = Vec::new();
        let mut candidates = 0usize;

        for resource in self.catalog.iter() {
            if !self.filter.matches(resource, &filters) {
                continue;
            }
            candidates += 1;

            if query.is_filter_only() {
                results.push(SearchResult {
                    resource: resource.summary(),
                    match_type: MatchType::Filter,
                    matched_term: String::new(),
                    matched_text: resource.name.clone(),
                    score: scoring::FILTER_MATCH_SCORE,
                });
                continue;
            }

            self.match_resource(resource, query, &mut results);
        }

        results.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(max) = self.config.max_results {
            results.truncate(max);
        }

        debug!(
            query = %query.raw,
            advanced = query.is_advanced,
            candidates,
            results = results.len(),
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "Search completed"
        );

        results
    }

    /// Match every searchable field of one resource, appending a result per
    /// matching (field, term) pair
    fn match_resource(&self, resource: &Resource, query: &SearchQuery, results: &mut Vec<SearchResult>) {
        let mut fields: Vec<(MatchType, &str)> = vec![
            (MatchType::Name, resource.name.as_str()),
            (MatchType::Location, resource.location.as_str()),
            (MatchType::Type, resource.resource_type.as_str()),
            (MatchType::ResourceGroup, resource.resource_group.as_str()),
        ];
        for (key, value) in &resource.tags {
            fields.push((MatchType::Tag, key.as_str()));
            fields.push((MatchType::Tag, value.as_str()));
        }

        for (match_type, text) in fields {
            for term in self.matcher.matching_terms(text, &query.terms, query.wildcards) {
                results.push(SearchResult {
                    resource: resource.summary(),
                    match_type,
                    matched_term: term.to_string(),
                    matched_text: text.to_string(),
                    score: scoring::score(match_type, term, text),
                });
            }
        }
    }

    /// Autocomplete candidates for a partial input
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        let suggestions = self.suggestions.suggest(&self.catalog, partial);
        debug!(partial, count = suggestions.len(), "Suggestions computed");
        suggestions
    }
}

/// Cloneable, thread-safe handle to a [`SearchEngine`].
///
/// Readers hold the lock only long enough to run a query; a catalog refresh
/// takes the write lock for the duration of the pointer swap.
#[derive(Debug, Clone)]
pub struct SharedSearchEngine {
    inner: Arc<RwLock<SearchEngine>>,
}

impl SharedSearchEngine {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn set_catalog(&self, resources: impl Into<Arc<[Resource]>>) {
        let resources = resources.into();
        self.inner.write().set_catalog(resources);
    }

    pub fn search(&self, raw: &str) -> Vec<SearchResult> {
        self.inner.read().search(raw)
    }

    pub fn search_query(&self, query: &SearchQuery) -> Vec<SearchResult> {
        self.inner.read().search_query(query)
    }

    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        self.inner.read().suggestions(partial)
    }

    pub fn catalog_len(&self) -> usize {
        self.inner.read().catalog_len()
    }
}
