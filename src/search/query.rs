//! Search query model
//!
//! A query is rebuilt per invocation from the UI/CLI controls and lives only
//! for one search run. Nothing here touches the catalog.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which matching strategy is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
    /// Weighted fuzzy match across all text fields
    #[default]
    All,
    /// Part-number lookup with separator-tolerant matching
    PartNumber,
    /// Model designator lookup (compatible models for parts)
    Model,
    /// Plain substring match over descriptions
    Description,
}

/// Stock-level facet; only constrains parts, equipment has no stock count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockFilter {
    #[default]
    All,
    /// Parts with 5 units or fewer
    Low,
    /// Parts with zero units
    Out,
}

/// Threshold for the `Low` stock facet
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// One search invocation: free text plus facet selections
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
    pub stock_filter: StockFilter,
    /// OR-matched brand names; empty means no restriction
    pub brand_filter: Vec<String>,
    /// OR-matched stock-country codes; empty means no restriction
    pub country_filter: Vec<String>,
}

impl SearchQuery {
    /// Plain full-text query with no facets
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// True when there is no usable query text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Strip the separator characters users sprinkle into part and model numbers
/// (space, hyphen, underscore, dot) and lowercase the rest.
///
/// The normalized form is used only for matching, never for display.
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize_identifier("1R-0742"), "1r0742");
        assert_eq!(normalize_identifier("20Y-70-11100"), "20y7011100");
        assert_eq!(normalize_identifier("1r 0"), "1r0");
        assert_eq!(normalize_identifier("a_b.c d"), "abcd");
    }

    #[test]
    fn test_normalize_keeps_other_punctuation() {
        // Only the four separator characters are stripped
        assert_eq!(normalize_identifier("A/B#1"), "a/b#1");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_identifier(""), "");
        assert_eq!(normalize_identifier(" -_."), "");
    }

    #[test]
    fn test_blank_query() {
        assert!(SearchQuery::new("").is_blank());
        assert!(SearchQuery::new("   ").is_blank());
        assert!(!SearchQuery::new("140M").is_blank());
    }

    #[test]
    fn test_defaults() {
        let q = SearchQuery::new("x");
        assert_eq!(q.mode, SearchMode::All);
        assert_eq!(q.stock_filter, StockFilter::All);
        assert!(q.brand_filter.is_empty());
        assert!(q.country_filter.is_empty());
    }
}
