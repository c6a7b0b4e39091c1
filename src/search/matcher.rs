//! Mode-specific text matching
//!
//! Pure functions of (item, query text) per search mode. A query that matches
//! nothing yields an empty result, never an error. The part-number algorithm
//! used to live in two UI surfaces with drift between them; it is consolidated
//! here and every call site goes through this module.

use super::fuzzy::FuzzyScorer;
use super::query::{normalize_identifier, SearchMode, SearchQuery};
use crate::catalog::items::CatalogItem;

/// Select the facet-filtered candidates that match the query text under the
/// active mode. Candidate order is preserved.
pub fn match_candidates<'a>(
    candidates: Vec<&'a CatalogItem>,
    query: &SearchQuery,
    scorer: &mut FuzzyScorer,
) -> Vec<&'a CatalogItem> {
    let text = query.text.trim();
    match query.mode {
        SearchMode::PartNumber => candidates
            .into_iter()
            .filter(|item| matches_part_number(item, text))
            .collect(),
        SearchMode::Model => candidates
            .into_iter()
            .filter(|item| matches_model(item, text))
            .collect(),
        SearchMode::Description => candidates
            .into_iter()
            .filter(|item| matches_description(item, text))
            .collect(),
        SearchMode::All => scorer.rank(candidates, text),
    }
}

/// Three-tier part-number match; only parts are eligible.
///
/// 1. Normalized substring in either direction (handles over- and
///    under-specified input: "1r0742" vs a stored "1R-0742-X").
/// 2. Raw lower-cased substring, in case the user typed the separators
///    exactly as stored.
/// 3. Subsequence scan over the normalized forms, so "1r 0" still finds
///    "1R-0742" via "1r0".
fn matches_part_number(item: &CatalogItem, text: &str) -> bool {
    let Some(part) = item.as_part() else {
        return false;
    };

    let query_lower = text.to_lowercase();
    let query_norm = normalize_identifier(text);
    let number_lower = part.part_number.to_lowercase();
    let number_norm = normalize_identifier(&part.part_number);

    if number_norm.contains(&query_norm) || query_norm.contains(&number_norm) {
        return true;
    }

    if number_lower.contains(&query_lower) {
        return true;
    }

    is_subsequence(&query_norm, &number_norm)
}

/// Every char of `needle` appears in `haystack` in the same relative order,
/// not necessarily contiguously.
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut needle_chars = needle.chars().peekable();
    for c in haystack.chars() {
        match needle_chars.peek() {
            Some(&n) if n == c => {
                needle_chars.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    needle_chars.peek().is_none()
}

fn matches_model(item: &CatalogItem, text: &str) -> bool {
    let query_lower = text.to_lowercase();
    match item {
        CatalogItem::Equipment(eq) => eq
            .model
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&query_lower)),
        CatalogItem::Part(part) => part
            .compatible_models
            .iter()
            .any(|m| m.to_lowercase().contains(&query_lower)),
    }
}

fn matches_description(item: &CatalogItem, text: &str) -> bool {
    let query_lower = text.to_lowercase();
    item.description()
        .is_some_and(|d| d.to_lowercase().contains(&query_lower))
}
