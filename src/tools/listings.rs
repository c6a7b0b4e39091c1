//! Listings command implementation
//!
//! Raw endpoint fetch with server-side filters, no client-side matching.
//! Useful for inspecting what the search pipeline sees.

use crate::cache::CatalogCache;
use crate::catalog::{CatalogClient, CatalogItem, ListingFilter};
use crate::cli::ListingsArgs;
use crate::error::AppError;
use crate::http::{client_with_timeout, DEFAULT_TIMEOUT};

/// Execute the listings command and return the rendered listing table
pub async fn execute_listings(args: ListingsArgs) -> Result<String, AppError> {
    let http = client_with_timeout(DEFAULT_TIMEOUT)?;
    let cache = CatalogCache::new().map_err(|e| AppError::CacheError(e.to_string()))?;
    let mut client = CatalogClient::new(http, &args.base_url)
        .map_err(|e| AppError::InvalidInput(format!("Invalid base URL: {}", e)))?
        .with_cache(cache);

    if args.refresh {
        client.evict_cache()?;
    }

    let filter = ListingFilter {
        brand: args.brand.clone(),
        min_price: args.min_price,
        max_price: args.max_price,
        is_sold: args.sold,
        stock_country: args.country.clone(),
        limit: args.limit,
        offset: args.offset,
        ..Default::default()
    };

    let items: Vec<CatalogItem> = match args.endpoint.as_str() {
        "graders" => client
            .fetch_graders(&filter)
            .await?
            .into_iter()
            .map(CatalogItem::Equipment)
            .collect(),
        "parts" => client
            .fetch_parts(&filter)
            .await?
            .into_iter()
            .map(CatalogItem::Part)
            .collect(),
        other => {
            return Err(AppError::InvalidInput(format!(
                "Unknown endpoint: {other}"
            )))
        }
    };

    Ok(format_listings(&items))
}

fn format_listings(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return "No listings returned.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("# Listings · {} items\n\n", items.len()));
    for item in items {
        match item {
            CatalogItem::Equipment(grader) => {
                out.push_str(&format!(
                    "- [{}] {} · ${:.2} · {}{}\n",
                    grader.id,
                    grader.title,
                    grader.price,
                    grader.stock_country.as_str(),
                    if grader.is_sold { " · sold" } else { "" },
                ));
            }
            CatalogItem::Part(part) => {
                out.push_str(&format!(
                    "- [{}] {} · {} · ${:.2} · {} in stock ({})\n",
                    part.id,
                    part.title,
                    part.part_number,
                    part.price,
                    part.stock_quantity,
                    part.stock_country.as_str(),
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::items::fixtures::{equipment, part};

    #[test]
    fn test_format_empty() {
        assert!(format_listings(&[]).contains("No listings returned"));
    }

    #[test]
    fn test_format_mixed_listings() {
        let items = vec![
            equipment("g1", "Caterpillar 140M", Some("140M")),
            part("p1", "1R-0742", "Cat", 15),
        ];
        let rendered = format_listings(&items);
        assert!(rendered.contains("2 items"));
        assert!(rendered.contains("[g1] Caterpillar 140M"));
        assert!(rendered.contains("1R-0742"));
        assert!(rendered.contains("15 in stock (EU)"));
    }
}
