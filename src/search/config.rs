//! Search configuration

use crate::search::matcher::WildcardMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Search engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchConfig {
    /// How `*` / `?` terms are evaluated
    #[serde(default)]
    pub wildcard_mode: WildcardMode,

    /// Truncate ranked results to this many entries (unbounded when unset)
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_results: Option<usize>,

    /// Shortest partial input that produces suggestions
    #[serde(default = "default_min_suggestion_chars")]
    #[validate(range(min = 1))]
    pub min_suggestion_chars: usize,

    /// Maximum number of suggestions returned
    #[serde(default = "default_max_suggestions")]
    #[validate(range(min = 1))]
    pub max_suggestions: usize,

    /// Type substrings excluded from every search
    #[serde(default)]
    pub excluded_types: Vec<String>,

    /// Extra `type:` aliases (alias -> canonical type substrings)
    #[serde(default)]
    pub type_aliases: HashMap<String, Vec<String>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            wildcard_mode: WildcardMode::default(),
            max_results: None,
            min_suggestion_chars: default_min_suggestion_chars(),
            max_suggestions: default_max_suggestions(),
            excluded_types: Vec::new(),
            type_aliases: HashMap::new(),
        }
    }
}

fn default_min_suggestion_chars() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    10
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn wildcard_mode(mut self, mode: WildcardMode) -> Self {
        self.config.wildcard_mode = mode;
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = Some(max);
        self
    }

    pub fn min_suggestion_chars(mut self, chars: usize) -> Self {
        self.config.min_suggestion_chars = chars;
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.config.max_suggestions = max;
        self
    }

    pub fn exclude_type(mut self, resource_type: impl Into<String>) -> Self {
        self.config.excluded_types.push(resource_type.into());
        self
    }

    pub fn type_alias(mut self, alias: impl Into<String>, expansions: Vec<String>) -> Self {
        self.config.type_aliases.insert(alias.into(), expansions);
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
