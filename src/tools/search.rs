//! Search command implementation
//!
//! Fetches a catalog snapshot, runs the search pipeline over it, and
//! renders the capped hit list as markdown with the query term emphasised.

use crate::cache::CatalogCache;
use crate::catalog::{CatalogClient, CatalogItem, ListingFilter};
use crate::cli::SearchArgs;
use crate::error::{normalize_text, validate_query, AppError};
use crate::http::{client_with_timeout, DEFAULT_TIMEOUT};
use crate::search::{highlight_term, SearchEngine, SearchHit, SearchQuery};
use tracing::debug;

/// Execute the search command and return the rendered result text
pub async fn execute_search(args: SearchArgs) -> Result<String, AppError> {
    validate_query(&args.query)?;
    let text = normalize_text(&args.query);

    let http = client_with_timeout(DEFAULT_TIMEOUT)?;
    let cache = CatalogCache::new().map_err(|e| AppError::CacheError(e.to_string()))?;
    let mut client = CatalogClient::new(http, &args.base_url)
        .map_err(|e| AppError::InvalidInput(format!("Invalid base URL: {}", e)))?
        .with_cache(cache);

    if args.refresh {
        client.evict_cache()?;
    }

    let catalog = client.fetch_catalog(&ListingFilter::default()).await?;
    debug!("Searching {} catalog items", catalog.len());

    let query = SearchQuery {
        text: text.clone(),
        mode: args.mode,
        stock_filter: args.stock,
        brand_filter: args.brands.clone(),
        country_filter: args.countries.clone(),
    };

    let mut engine = SearchEngine::default();
    let hits = engine.search(&catalog, &query);
    Ok(format_search_results(&hits, &text))
}

/// Render the hit list as markdown
fn format_search_results(hits: &[SearchHit<'_>], query: &str) -> String {
    if hits.is_empty() {
        return format!("No listings matched \"{}\".\n", query);
    }

    let mut md = String::new();
    md.push_str(&format!("# Search Results · {} listings\n\n", hits.len()));

    for hit in hits {
        md.push_str(&format!(
            "{}. {}\n",
            hit.rank + 1,
            highlight_term(hit.item.title(), query)
        ));

        match hit.item {
            CatalogItem::Part(part) => {
                md.push_str(&format!(
                    "   Part {} · {} in stock ({})\n",
                    highlight_term(&part.part_number, query),
                    part.stock_quantity,
                    part.stock_country.as_str(),
                ));
                if !part.compatible_models.is_empty() {
                    md.push_str(&format!(
                        "   Fits: {}\n",
                        highlight_term(&part.compatible_models.join(", "), query)
                    ));
                }
            }
            CatalogItem::Equipment(grader) => {
                if let Some(model) = &grader.model {
                    md.push_str(&format!("   Model {}\n", highlight_term(model, query)));
                }
                md.push_str(&format!(
                    "   {} ({})\n",
                    if grader.is_sold { "Sold" } else { "Available" },
                    grader.stock_country.as_str(),
                ));
            }
        }

        md.push_str(&format!("   ${:.2}\n", hit.item.price()));
        if let Some(description) = hit.item.description() {
            md.push_str(&format!("   > {}\n", highlight_term(description, query)));
        }
        md.push('\n');
    }

    md
}
