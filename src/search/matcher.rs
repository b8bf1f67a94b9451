//! Literal and wildcard term matching against field text

use crate::search::query::has_wildcard;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How `*` and `?` patterns are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WildcardMode {
    /// Every non-empty `*`-separated fragment must appear somewhere in the
    /// text. Fragment order and anchoring are not checked.
    #[default]
    Fragments,

    /// Ordered glob over the whole text, anchored at both ends
    Glob,
}

/// Matches query terms against a single field's text
///
/// Empty field text never matches, including against a lone `*`. A blank
/// location or resource group therefore yields no match for that field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatcher {
    mode: WildcardMode,
}

impl TextMatcher {
    pub fn new(mode: WildcardMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> WildcardMode {
        self.mode
    }

    /// Return the terms that match `text`, in term order
    pub fn matching_terms<'a>(&self, text: &str, terms: &'a [String], wildcards: bool) -> Vec<&'a str> {
        if text.is_empty() || terms.is_empty() {
            return Vec::new();
        }

        let text = text.to_lowercase();
        terms
            .iter()
            .filter(|term| self.matches_lowered(&text, &term.to_lowercase(), wildcards))
            .map(String::as_str)
            .collect()
    }

    /// True when `term` matches `text`
    pub fn matches(&self, text: &str, term: &str, wildcards: bool) -> bool {
        self.matches_lowered(&text.to_lowercase(), &term.to_lowercase(), wildcards)
    }

    fn matches_lowered(&self, text: &str, term: &str, wildcards: bool) -> bool {
        if !wildcards || !has_wildcard(term) {
            return text.contains(term);
        }

        match self.mode {
            WildcardMode::Fragments => fragments_match(text, term),
            WildcardMode::Glob => glob_match(text, term),
        }
    }
}

/// Split the pattern on `*` and require each non-empty fragment to occur
/// somewhere in the text. A pattern of only `*` matches everything.
fn fragments_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();

    pattern
        .split('*')
        .filter(|fragment| !fragment.is_empty())
        .all(|fragment| {
            let fragment: Vec<char> = fragment.chars().collect();
            contains_fragment(&text, &fragment)
        })
}

/// Substring search where `?` in the fragment matches any one character
fn contains_fragment(text: &[char], fragment: &[char]) -> bool {
    if fragment.len() > text.len() {
        return false;
    }

    text.windows(fragment.len()).any(|window| {
        window
            .iter()
            .zip(fragment)
            .all(|(t, p)| *p == '?' || t == p)
    })
}

/// Anchored glob: `*` matches any run of characters, `?` exactly one
fn glob_match(text: &str, pattern: &str) -> bool {
    match glob_regex(pattern) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid glob pattern");
            false
        }
    }
}

/// Translate a glob into a regex anchored at both ends, escaping literal runs
fn glob_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::from("(?s)^");
    let mut literal = String::new();

    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }

    source.push_str(&regex::escape(&literal));
    source.push('$');
    Regex::new(&source)
}
