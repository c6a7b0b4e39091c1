//! Search engine composition
//!
//! One engine call runs the full pipeline against a read-only catalog
//! snapshot: facet filter, mode-specific text match, dedupe, part-number
//! tie-break sort, display cap. Nothing is cached or mutated between calls;
//! the same inputs always produce the same output.

use super::facet::apply_facets;
use super::fuzzy::{FuzzyConfig, FuzzyScorer};
use super::matcher::match_candidates;
use super::query::SearchQuery;
use super::ranking;
use crate::catalog::items::{CatalogItem, ItemKind};
use std::collections::HashSet;

/// One entry of the capped result list
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub item: &'a CatalogItem,
    /// Position in the final ordering, 0-based
    pub rank: usize,
}

impl SearchHit<'_> {
    /// Routing identity for the detail view behind this hit
    pub fn route_key(&self) -> (ItemKind, &str) {
        self.item.route_key()
    }
}

/// Live-search engine over an in-memory catalog snapshot
pub struct SearchEngine {
    scorer: FuzzyScorer,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

impl SearchEngine {
    pub fn new(fuzzy: FuzzyConfig) -> Self {
        Self {
            scorer: FuzzyScorer::new(fuzzy),
        }
    }

    /// Run one query against the snapshot; at most
    /// [`ranking::RESULT_CAP`] hits, each item at most once.
    pub fn search<'a>(
        &mut self,
        catalog: &'a [CatalogItem],
        query: &SearchQuery,
    ) -> Vec<SearchHit<'a>> {
        if query.is_blank() {
            return Vec::new();
        }

        let pool = apply_facets(catalog, query);
        let matched = match_candidates(pool, query, &mut self.scorer);

        // A catalog snapshot assembled from several fetches can repeat a
        // listing; each (kind, id) pair surfaces once.
        let mut seen: HashSet<(ItemKind, &str)> = HashSet::new();
        let deduped: Vec<&CatalogItem> = matched
            .into_iter()
            .filter(|item| seen.insert(item.route_key()))
            .collect();

        ranking::rank(deduped, &query.text)
            .into_iter()
            .enumerate()
            .map(|(rank, item)| SearchHit { item, rank })
            .collect()
    }
}
