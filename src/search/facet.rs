//! Facet filtering
//!
//! Narrows the candidate pool before any text matching runs. Facets and the
//! mode match combine with logical AND; input order is preserved.

use super::query::{SearchQuery, StockFilter, LOW_STOCK_THRESHOLD};
use crate::catalog::items::CatalogItem;

/// Apply the stock/brand/country facets from `query` to `candidates`.
///
/// Equipment is never excluded by stock filters: it has no stock quantity,
/// and hiding it behind a parts-only facet surprised users in practice.
pub fn apply_facets<'a>(candidates: &'a [CatalogItem], query: &SearchQuery) -> Vec<&'a CatalogItem> {
    candidates
        .iter()
        .filter(|item| passes_stock(item, query.stock_filter))
        .filter(|item| passes_brand(item, &query.brand_filter))
        .filter(|item| passes_country(item, &query.country_filter))
        .collect()
}

fn passes_stock(item: &CatalogItem, filter: StockFilter) -> bool {
    let Some(part) = item.as_part() else {
        // Stock facets only constrain parts
        return true;
    };
    match filter {
        StockFilter::All => true,
        StockFilter::Low => part.stock_quantity <= LOW_STOCK_THRESHOLD,
        StockFilter::Out => part.stock_quantity == 0,
    }
}

fn passes_brand(item: &CatalogItem, brands: &[String]) -> bool {
    if brands.is_empty() {
        return true;
    }
    // Exact, case-sensitive membership; a missing brand fails the facet
    match item.brand() {
        Some(brand) => brands.iter().any(|b| b == brand),
        None => false,
    }
}

fn passes_country(item: &CatalogItem, countries: &[String]) -> bool {
    if countries.is_empty() {
        return true;
    }
    let code = item.stock_country().as_str();
    countries.iter().any(|c| c == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::items::fixtures::{equipment, part};
    use crate::search::query::SearchQuery;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            equipment("g1", "Caterpillar 140M", Some("140M")),
            part("p1", "1R-0742", "Cat", 15),
            part("p2", "20Y-70-11100", "Komatsu", 0),
            part("p3", "4T-2967", "Cat", 3),
        ]
    }

    #[test]
    fn test_no_facets_keeps_everything_in_order() {
        let items = catalog();
        let kept = apply_facets(&items, &SearchQuery::new("x"));
        let ids: Vec<&str> = kept.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["g1", "p1", "p2", "p3"]);
    }

    #[test]
    fn test_low_stock_keeps_equipment() {
        let items = catalog();
        let mut query = SearchQuery::new("x");
        query.stock_filter = StockFilter::Low;
        let kept = apply_facets(&items, &query);
        let ids: Vec<&str> = kept.iter().map(|i| i.id()).collect();
        // g1 is equipment and exempt; p1 has 15 units and drops out
        assert_eq!(ids, vec!["g1", "p2", "p3"]);
    }

    #[test]
    fn test_out_of_stock_only_zero_quantity_parts() {
        let items = catalog();
        let mut query = SearchQuery::new("x");
        query.stock_filter = StockFilter::Out;
        let kept = apply_facets(&items, &query);
        let ids: Vec<&str> = kept.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["g1", "p2"]);
    }

    #[test]
    fn test_brand_filter_is_case_sensitive() {
        let items = catalog();
        let mut query = SearchQuery::new("x");
        query.brand_filter = vec!["cat".to_string()];
        assert!(apply_facets(&items, &query).is_empty());

        query.brand_filter = vec!["Cat".to_string()];
        let ids: Vec<&str> = apply_facets(&items, &query).iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["g1", "p1", "p3"]);
    }

    #[test]
    fn test_missing_brand_fails_nonempty_filter() {
        let mut item = part("p9", "X-1", "Cat", 1);
        if let CatalogItem::Part(p) = &mut item {
            p.brand = None;
        }
        let items = vec![item];
        let mut query = SearchQuery::new("x");
        query.brand_filter = vec!["Cat".to_string()];
        assert!(apply_facets(&items, &query).is_empty());
    }

    #[test]
    fn test_country_filter_applies_to_both_kinds() {
        let mut items = catalog();
        if let CatalogItem::Part(p) = &mut items[2] {
            p.stock_country = crate::catalog::items::StockCountry::Us;
        }
        let mut query = SearchQuery::new("x");
        query.country_filter = vec!["US".to_string()];
        let ids: Vec<&str> = apply_facets(&items, &query).iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["p2"]);
    }

    #[test]
    fn test_facets_compose_with_and() {
        let items = catalog();
        let mut query = SearchQuery::new("x");
        query.stock_filter = StockFilter::Out;
        query.brand_filter = vec!["Komatsu".to_string()];
        let ids: Vec<&str> = apply_facets(&items, &query).iter().map(|i| i.id()).collect();
        // Equipment survives the stock facet but not the brand facet
        assert_eq!(ids, vec!["p2"]);
    }
}
