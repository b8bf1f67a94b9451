//! Relevance scoring

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Base score every match starts from
pub const BASE_SCORE: i64 = 100;

/// Bonus when the term equals the whole field
pub const EXACT_MATCH_BONUS: i64 = 1000;

/// Bonus when the field starts with the term
pub const PREFIX_MATCH_BONUS: i64 = 500;

/// Score of a synthetic match produced by a filter-only query
pub const FILTER_MATCH_SCORE: i64 = 100;

/// Lowest score a match can receive
pub const MIN_SCORE: i64 = 1;

/// Field category a result was produced from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchType {
    Name,
    Location,
    Type,
    ResourceGroup,
    Tag,
    Filter,
}

impl MatchType {
    /// Weight added once per match of this type
    pub fn weight(&self) -> i64 {
        match self {
            MatchType::Name => 800,
            MatchType::Type => 600,
            MatchType::ResourceGroup => 400,
            MatchType::Location => 300,
            MatchType::Tag => 200,
            MatchType::Filter => 0,
        }
    }
}

/// Deterministic score of a single (match type, term, field text) triple
pub fn score(match_type: MatchType, term: &str, field_text: &str) -> i64 {
    if match_type == MatchType::Filter {
        return FILTER_MATCH_SCORE;
    }

    let term = term.to_lowercase();
    let text = field_text.to_lowercase();

    let mut score = BASE_SCORE;

    if text == term {
        score += EXACT_MATCH_BONUS;
    }

    if text.starts_with(&term) {
        score += PREFIX_MATCH_BONUS;
    }

    score += match_type.weight();
    score -= (field_text.chars().count() / 10) as i64;

    score.max(MIN_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_match() {
        // 100 + 1000 + 500 + 800 - 1
        assert_eq!(score(MatchType::Name, "exact-match", "exact-match"), 2399);
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        assert_eq!(score(MatchType::Name, "exact-match", "Exact-Match"), 2399);
    }

    #[test]
    fn test_prefix_match() {
        // 100 + 500 + 800 - 1
        assert_eq!(score(MatchType::Name, "web", "web-server-vm"), 1399);
    }

    #[test]
    fn test_substring_match() {
        // 100 + 300 - 0
        assert_eq!(score(MatchType::Location, "us", "eastus"), 400);
    }

    #[test]
    fn test_type_weights() {
        let text = "abc";
        assert_eq!(score(MatchType::Type, "b", text), 700);
        assert_eq!(score(MatchType::ResourceGroup, "b", text), 500);
        assert_eq!(score(MatchType::Tag, "b", text), 300);
    }

    #[test]
    fn test_length_penalty() {
        let long = "x".repeat(95);
        // 100 + 200 - 9
        assert_eq!(score(MatchType::Tag, "y", &long), 291);
    }

    #[test]
    fn test_score_floor() {
        let huge = "z".repeat(10_000);
        assert_eq!(score(MatchType::Tag, "q", &huge), MIN_SCORE);
    }

    #[test]
    fn test_filter_score_is_flat() {
        assert_eq!(score(MatchType::Filter, "", "anything at all"), FILTER_MATCH_SCORE);
    }

    #[test]
    fn test_match_type_strings() {
        assert_eq!(MatchType::ResourceGroup.to_string(), "resource_group");
        assert_eq!("tag".parse::<MatchType>().unwrap(), MatchType::Tag);
        assert_eq!(
            serde_json::to_string(&MatchType::Name).unwrap(),
            "\"name\""
        );
    }
}
