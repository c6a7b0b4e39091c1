//! Weighted full-text fuzzy scoring using nucleo-matcher
//!
//! Drives the `All` search mode: every text field of a listing is scored
//! with the Smith-Waterman matcher from the nucleo-matcher crate (used in
//! the Helix editor), scaled by a per-field weight, and the best field wins.
//! Threshold and weights are tunable; the defaults are deliberately strict
//! but typo-tolerant.

use crate::catalog::items::CatalogItem;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};
use unicode_normalization::UnicodeNormalization;

/// Per-field weights for the multi-field score.
///
/// Part numbers dominate: technicians searching by the number printed on a
/// physical part are the main real-world use case.
#[derive(Debug, Clone)]
pub struct FieldWeights {
    pub title: f64,
    pub part_number: f64,
    pub model: f64,
    pub description: f64,
    pub brand: f64,
    pub category: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            part_number: 0.4,
            model: 0.3,
            description: 0.2,
            brand: 0.2,
            category: 0.1,
        }
    }
}

/// Tuning knobs for the approximate matcher
#[derive(Debug, Clone)]
pub struct FuzzyConfig {
    /// Maximum normalized distance (0 exact .. 1 unrelated) a field may have
    /// and still count as a match
    pub max_distance: f64,
    pub weights: FieldWeights,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            max_distance: 0.3,
            weights: FieldWeights::default(),
        }
    }
}

/// Multi-field fuzzy scorer; holds the nucleo matcher state
pub struct FuzzyScorer {
    matcher: Matcher,
    config: FuzzyConfig,
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

impl FuzzyScorer {
    pub fn new(config: FuzzyConfig) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            config,
        }
    }

    /// Keep the candidates whose best weighted field clears the threshold,
    /// ordered best-first. Ties keep their input order.
    pub fn rank<'a>(
        &mut self,
        candidates: Vec<&'a CatalogItem>,
        needle: &str,
    ) -> Vec<&'a CatalogItem> {
        if needle.trim().is_empty() {
            return Vec::new();
        }

        let needle_norm: String = needle.nfc().collect();

        // The raw matcher only accepts pre-folded single atoms; Pattern does
        // the word splitting and case folding, and a multi-word query scores
        // as the sum of its per-word matches.
        let pattern = Pattern::parse(&needle_norm, CaseMatching::Ignore, Normalization::Smart);

        // Best achievable score: the needle matched against itself. Field
        // scores are normalized against it to get a 0..1 similarity.
        let needle_utf32 = Utf32String::from(needle_norm.as_str());
        let self_score = match pattern.score(needle_utf32.slice(..), &mut self.matcher) {
            Some(score) if score > 0 => f64::from(score),
            _ => return Vec::new(),
        };

        let mut scored: Vec<(f64, &CatalogItem)> = candidates
            .into_iter()
            .filter_map(|item| {
                self.score_item(item, &pattern, self_score)
                    .map(|score| (score, item))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, item)| item).collect()
    }

    /// Weighted best-field score for one listing, or `None` when no field
    /// comes close enough
    fn score_item(
        &mut self,
        item: &CatalogItem,
        pattern: &Pattern,
        self_score: f64,
    ) -> Option<f64> {
        let mut best: Option<f64> = None;

        for (text, weight) in weighted_fields(item, &self.config.weights) {
            let haystack_norm: String = text.nfc().collect();
            let haystack = Utf32String::from(haystack_norm.as_str());
            let Some(score) = pattern.score(haystack.slice(..), &mut self.matcher) else {
                continue;
            };

            let similarity = (f64::from(score) / self_score).min(1.0);
            if 1.0 - similarity > self.config.max_distance {
                continue;
            }

            let weighted = similarity * weight;
            best = Some(match best {
                Some(existing) if existing >= weighted => existing,
                _ => weighted,
            });
        }

        best
    }
}

/// The searchable text fields of a listing with their weights
fn weighted_fields<'a>(item: &'a CatalogItem, weights: &FieldWeights) -> Vec<(&'a str, f64)> {
    let mut fields = vec![(item.title(), weights.title)];

    match item {
        CatalogItem::Equipment(eq) => {
            if let Some(model) = eq.model.as_deref() {
                fields.push((model, weights.model));
            }
        }
        CatalogItem::Part(part) => {
            fields.push((part.part_number.as_str(), weights.part_number));
            if let Some(category) = part.category.as_deref() {
                fields.push((category, weights.category));
            }
        }
    }

    if let Some(description) = item.description() {
        fields.push((description, weights.description));
    }
    if let Some(brand) = item.brand() {
        fields.push((brand, weights.brand));
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::items::fixtures::{equipment, part};

    fn ids(items: Vec<&CatalogItem>) -> Vec<&str> {
        items.into_iter().map(CatalogItem::id).collect()
    }

    #[test]
    fn test_exact_title_word_matches() {
        let items = vec![
            equipment("g1", "Caterpillar 140M Motor Grader", Some("140M")),
            equipment("g2", "Komatsu GD655 Grader", Some("GD655")),
        ];
        let mut scorer = FuzzyScorer::default();
        let hits = scorer.rank(items.iter().collect(), "Komatsu");
        assert_eq!(ids(hits), vec!["g2"]);
    }

    #[test]
    fn test_unrelated_query_matches_nothing() {
        let items = vec![equipment("g1", "Caterpillar 140M Motor Grader", Some("140M"))];
        let mut scorer = FuzzyScorer::default();
        assert!(scorer.rank(items.iter().collect(), "zzqqvv").is_empty());
    }

    #[test]
    fn test_part_number_field_weighs_heavier_than_description() {
        let mut items = vec![part("p1", "1R-0742", "Cat", 5), part("p2", "9X-1180", "Cat", 5)];
        if let CatalogItem::Part(p) = &mut items[1] {
            p.description = Some("1R-0742 compatible filter".to_string());
        }
        let mut scorer = FuzzyScorer::default();
        let hits = scorer.rank(items.iter().collect(), "1R-0742");
        assert!(!hits.is_empty());
        // The item carrying the number in its partNumber field outranks the
        // one that only mentions it in the description.
        assert_eq!(hits[0].id(), "p1");
    }

    #[test]
    fn test_multi_word_mixed_case_query() {
        // A capitalised two-word query against a field that keeps going
        // after the matched words must score, not blow up in the matcher.
        let items = vec![
            equipment("g1", "Motor Grader in yard", None),
            equipment("g2", "Hydraulic pump spares", None),
        ];
        let mut scorer = FuzzyScorer::default();
        assert_eq!(ids(scorer.rank(items.iter().collect(), "Motor Grader")), vec!["g1"]);
    }

    #[test]
    fn test_empty_needle_yields_nothing() {
        let items = vec![equipment("g1", "Grader", None)];
        let mut scorer = FuzzyScorer::default();
        assert!(scorer.rank(items.iter().collect(), "").is_empty());
        assert!(scorer.rank(items.iter().collect(), "   ").is_empty());
    }

    #[test]
    fn test_exact_field_match_always_included() {
        let items = vec![equipment("g1", "Caterpillar Grader", None)];
        let strict = FuzzyConfig {
            max_distance: 0.0,
            ..FuzzyConfig::default()
        };
        // Even with zero tolerance an exact token self-match survives.
        let mut scorer = FuzzyScorer::new(strict);
        assert_eq!(
            ids(scorer.rank(items.iter().collect(), "Caterpillar Grader")),
            vec!["g1"]
        );
    }
}
