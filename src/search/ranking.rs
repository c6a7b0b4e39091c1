//! Result ordering and capping
//!
//! Part-number hits outrank everything else: the dominant real-world query is
//! a technician typing the number printed on a physical part, and those hits
//! must beat thematically-similar fuzzy matches. The sort is stable, so items
//! that tie keep the relative order the matcher produced.

use super::query::normalize_identifier;
use crate::catalog::items::CatalogItem;
use std::cmp::Ordering;

/// Display cap for the live-search popover
pub const RESULT_CAP: usize = 8;

/// Precedence class of one item for the tie-break sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PartNumberRank {
    /// `partNumber` equals the query after separator-stripping normalization
    Exact,
    /// normalized `partNumber` contains the normalized query as a substring
    Partial,
    Other,
}

fn classify(item: &CatalogItem, query_norm: &str) -> PartNumberRank {
    let Some(part) = item.as_part() else {
        return PartNumberRank::Other;
    };
    // Normalized comparison subsumes the raw case-insensitive one: stripping
    // separators from both sides preserves equality and containment.
    let number_norm = normalize_identifier(&part.part_number);
    if number_norm == query_norm {
        PartNumberRank::Exact
    } else if !query_norm.is_empty() && number_norm.contains(query_norm) {
        PartNumberRank::Partial
    } else {
        PartNumberRank::Other
    }
}

/// Order matched items (exact part number, then partial, then matcher order)
/// and truncate to [`RESULT_CAP`].
pub fn rank<'a>(mut matches: Vec<&'a CatalogItem>, query_text: &str) -> Vec<&'a CatalogItem> {
    let query_norm = normalize_identifier(query_text.trim());

    matches.sort_by(|a, b| {
        classify(a, &query_norm)
            .cmp(&classify(b, &query_norm))
            .then(Ordering::Equal)
    });

    matches.truncate(RESULT_CAP);
    matches
}
