//! Search query parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Structured filters extracted from an advanced query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Location substring (`location:` / `loc:`)
    pub location: Option<String>,

    /// Resource type substring or alias (`type:`)
    pub resource_type: Option<String>,

    /// Resource group substring (`rg:` / `resourcegroup:` / `resource-group:`)
    pub resource_group: Option<String>,

    /// Required tags. An empty value means the tag only has to exist.
    pub tags: BTreeMap<String, String>,

    /// Type substrings that reject a resource outright
    pub excluded_types: Vec<String>,
}

impl SearchFilters {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_excluded_type(mut self, resource_type: impl Into<String>) -> Self {
        self.excluded_types.push(resource_type.into());
        self
    }

    /// True when no constraint is active
    pub fn is_empty(&self) -> bool {
        let unset = |f: &Option<String>| f.as_deref().map_or(true, str::is_empty);

        unset(&self.location)
            && unset(&self.resource_type)
            && unset(&self.resource_group)
            && self.tags.is_empty()
            && self.excluded_types.is_empty()
    }
}

/// Boolean keyword seen in an advanced query.
///
/// Keywords are recorded so callers can see them, but no boolean algebra is
/// applied: every filter is always ANDed and free-text terms always match
/// independently, whatever keywords appear in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanKeyword {
    And,
    Or,
    Not,
}

/// A parsed search query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The input string, untouched
    pub raw: String,

    /// Lower-cased free-text terms, deduplicated in first-seen order
    pub terms: Vec<String>,

    /// Structured filters
    pub filters: SearchFilters,

    /// Set once any `key:value` token or boolean keyword triggers advanced parsing
    pub is_advanced: bool,

    /// Set when any term contains `*` or `?`
    pub wildcards: bool,

    /// Boolean keywords that were consumed (recognized, not enforced)
    pub boolean_keywords: Vec<BooleanKeyword>,
}

impl SearchQuery {
    /// Parse a raw query string.
    ///
    /// Parsing never fails: unknown keys and malformed tokens are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut query = Self {
            raw: raw.to_string(),
            ..Default::default()
        };

        if Self::is_advanced_query(raw) {
            query.is_advanced = true;
            query.parse_advanced(raw);
        } else {
            for term in raw.to_lowercase().split_whitespace() {
                query.push_term(term.to_string());
            }
        }

        query.wildcards = query.terms.iter().any(|t| has_wildcard(t));
        query
    }

    /// True for empty or whitespace-only input
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// True when the query only filters and has no free text to match
    pub fn is_filter_only(&self) -> bool {
        self.is_advanced && self.terms.is_empty()
    }

    /// Advanced mode is triggered by a `:` anywhere, or by the exact uppercase
    /// tokens `AND` / `NOT`.
    fn is_advanced_query(raw: &str) -> bool {
        raw.contains(':')
            || raw
                .split_whitespace()
                .any(|token| token == "AND" || token == "NOT")
    }

    fn parse_advanced(&mut self, raw: &str) {
        for token in raw.split_whitespace() {
            if let Some((key, value)) = token.split_once(':') {
                self.apply_key_value(&key.to_lowercase(), value.to_lowercase());
                continue;
            }

            if let Ok(keyword) = token.parse::<BooleanKeyword>() {
                self.boolean_keywords.push(keyword);
                continue;
            }

            self.push_term(token.to_lowercase());
        }
    }

    fn apply_key_value(&mut self, key: &str, value: String) {
        match key {
            "type" => self.filters.resource_type = Some(value),
            "location" | "loc" => self.filters.location = Some(value),
            "rg" | "resourcegroup" | "resource-group" => self.filters.resource_group = Some(value),
            "tag" => {
                let (tag_key, tag_value) = value.split_once('=').unwrap_or((value.as_str(), ""));
                // A tag filter without a key is ignored
                if !tag_key.is_empty() {
                    self.filters
                        .tags
                        .insert(tag_key.to_string(), tag_value.to_string());
                }
            }
            "name" => self.push_term(value),
            _ => {}
        }
    }

    fn push_term(&mut self, term: String) {
        if !term.is_empty() && !self.terms.contains(&term) {
            self.terms.push(term);
        }
    }
}

/// True when the term contains a glob metacharacter
pub fn has_wildcard(term: &str) -> bool {
    term.contains('*') || term.contains('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_query() {
        let query = SearchQuery::parse("Web  Server");

        assert!(!query.is_advanced);
        assert!(!query.wildcards);
        assert_eq!(query.terms, vec!["web", "server"]);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_simple_query_wildcards() {
        let query = SearchQuery::parse("web-* db?");
        assert!(query.wildcards);
        assert_eq!(query.terms, vec!["web-*", "db?"]);
    }

    #[test]
    fn test_duplicate_terms_collapse() {
        let query = SearchQuery::parse("web WEB web");
        assert_eq!(query.terms, vec!["web"]);
    }

    #[test]
    fn test_advanced_filters() {
        let query = SearchQuery::parse("type:VM loc:EastUS rg:prod-rg name:Web api");

        assert!(query.is_advanced);
        assert_eq!(query.filters.resource_type.as_deref(), Some("vm"));
        assert_eq!(query.filters.location.as_deref(), Some("eastus"));
        assert_eq!(query.filters.resource_group.as_deref(), Some("prod-rg"));
        assert_eq!(query.terms, vec!["web", "api"]);
    }

    #[test]
    fn test_resource_group_key_spellings() {
        for raw in ["rg:x", "resourcegroup:x", "resource-group:x", "ResourceGroup:X"] {
            let query = SearchQuery::parse(raw);
            assert_eq!(query.filters.resource_group.as_deref(), Some("x"), "{}", raw);
        }
        assert_eq!(
            SearchQuery::parse("location:westus").filters.location.as_deref(),
            Some("westus")
        );
    }

    #[test]
    fn test_tag_filters() {
        let query = SearchQuery::parse("tag:Env=Production tag:owner");

        assert_eq!(query.filters.tags.get("env").map(String::as_str), Some("production"));
        assert_eq!(query.filters.tags.get("owner").map(String::as_str), Some(""));
        assert!(query.terms.is_empty());
        assert!(query.is_filter_only());
    }

    #[test]
    fn test_tag_value_split_once() {
        let query = SearchQuery::parse("tag:expr=a=b");
        assert_eq!(query.filters.tags.get("expr").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_tag_without_key_is_ignored() {
        for raw in ["tag: web", "tag:=prod web", "TAG: web"] {
            let query = SearchQuery::parse(raw);

            assert!(query.is_advanced, "{}", raw);
            assert!(query.filters.tags.is_empty(), "{}", raw);
            assert_eq!(query.terms, vec!["web"], "{}", raw);
        }
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let query = SearchQuery::parse("name:host:8080");
        assert_eq!(query.terms, vec!["host:8080"]);
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let query = SearchQuery::parse("color:blue :orphan web");

        assert!(query.is_advanced);
        assert!(query.filters.is_empty());
        assert_eq!(query.terms, vec!["web"]);
    }

    #[test]
    fn test_boolean_keywords_trigger_advanced_mode() {
        let query = SearchQuery::parse("web AND db NOT test");

        assert!(query.is_advanced);
        assert_eq!(query.terms, vec!["web", "db", "test"]);
        assert_eq!(
            query.boolean_keywords,
            vec![BooleanKeyword::And, BooleanKeyword::Not]
        );
    }

    #[test]
    fn test_keyword_detection_is_case_sensitive() {
        let query = SearchQuery::parse("web and db");
        assert!(!query.is_advanced);
        assert_eq!(query.terms, vec!["web", "and", "db"]);

        // OR alone does not switch modes
        let query = SearchQuery::parse("web OR db");
        assert!(!query.is_advanced);
        assert_eq!(query.terms, vec!["web", "or", "db"]);
    }

    #[test]
    fn test_keywords_consumed_case_insensitively_in_advanced_mode() {
        let query = SearchQuery::parse("type:vm web or db");

        assert_eq!(query.terms, vec!["web", "db"]);
        assert_eq!(query.boolean_keywords, vec![BooleanKeyword::Or]);
    }

    #[test]
    fn test_advanced_wildcards() {
        let query = SearchQuery::parse("type:vm web-*");
        assert!(query.wildcards);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "type:vm tag:env=prod web* AND api";
        assert_eq!(SearchQuery::parse(raw), SearchQuery::parse(raw));
    }

    #[test]
    fn test_empty_query() {
        assert!(SearchQuery::parse("").is_empty());
        assert!(SearchQuery::parse(" \t\n").is_empty());
        assert!(!SearchQuery::parse("x").is_empty());
    }
}
