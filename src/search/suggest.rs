//! Autocomplete suggestions over the resource catalog

use crate::models::Resource;
use std::collections::BTreeSet;

/// Prefix-based autocomplete over names, locations, type suffixes and tag keys
#[derive(Debug, Clone, Copy)]
pub struct SuggestionIndex {
    min_chars: usize,
    max_suggestions: usize,
}

impl Default for SuggestionIndex {
    fn default() -> Self {
        Self::new(2, 10)
    }
}

impl SuggestionIndex {
    pub fn new(min_chars: usize, max_suggestions: usize) -> Self {
        Self {
            min_chars,
            max_suggestions,
        }
    }

    /// Collect unique candidates whose lower-cased form starts with `partial`,
    /// sorted lexicographically and capped at the configured maximum
    pub fn suggest(&self, catalog: &[Resource], partial: &str) -> Vec<String> {
        if partial.chars().count() < self.min_chars {
            return Vec::new();
        }

        let prefix = partial.to_lowercase();
        let mut seen = BTreeSet::new();

        for resource in catalog {
            let candidates = [
                resource.name.as_str(),
                resource.location.as_str(),
                resource.type_suffix(),
            ]
            .into_iter()
            .chain(resource.tags.keys().map(String::as_str));

            for candidate in candidates {
                if !candidate.is_empty() && candidate.to_lowercase().starts_with(&prefix) {
                    seen.insert(candidate.to_string());
                }
            }
        }

        seen.into_iter().take(self.max_suggestions).collect()
    }
}
