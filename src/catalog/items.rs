//! Catalog record types
//!
//! Typed listings as returned by the marketplace REST API. The search core
//! treats these as a read-only snapshot; all mutation happens server-side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a listing's stock is physically held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockCountry {
    #[serde(rename = "EU")]
    Eu,
    Kenya,
    #[serde(rename = "US")]
    Us,
}

impl StockCountry {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockCountry::Eu => "EU",
            StockCountry::Kenya => "Kenya",
            StockCountry::Us => "US",
        }
    }
}

/// Discriminant for the two listing variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Equipment,
    Part,
}

/// A road-grader listing from `/api/graders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "isSold", default)]
    pub is_sold: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "listingDate", default)]
    pub listing_date: Option<chrono::NaiveDate>,
    #[serde(rename = "stockCountry")]
    pub stock_country: StockCountry,
    /// Nested specs arrive JSON-encoded from the API; the search core never
    /// reads them, so they stay untyped
    #[serde(rename = "technicalSpecs", default)]
    pub technical_specs: Option<Value>,
}

/// A spare-part listing from `/api/parts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(rename = "partNumber")]
    pub part_number: String,
    #[serde(rename = "compatibleModels", default)]
    pub compatible_models: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "stockQuantity", default)]
    pub stock_quantity: u32,
    #[serde(rename = "isSold", default)]
    pub is_sold: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "listingDate", default)]
    pub listing_date: Option<chrono::NaiveDate>,
    #[serde(rename = "stockCountry")]
    pub stock_country: StockCountry,
    #[serde(default)]
    pub specifications: Option<Value>,
}

/// A listing of either kind, tagged for exhaustive matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CatalogItem {
    Equipment(Equipment),
    Part(Part),
}

impl CatalogItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            CatalogItem::Equipment(_) => ItemKind::Equipment,
            CatalogItem::Part(_) => ItemKind::Part,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Equipment(e) => &e.id,
            CatalogItem::Part(p) => &p.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Equipment(e) => &e.title,
            CatalogItem::Part(p) => &p.title,
        }
    }

    pub fn brand(&self) -> Option<&str> {
        match self {
            CatalogItem::Equipment(e) => e.brand.as_deref(),
            CatalogItem::Part(p) => p.brand.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            CatalogItem::Equipment(e) => e.description.as_deref(),
            CatalogItem::Part(p) => p.description.as_deref(),
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            CatalogItem::Equipment(e) => e.price,
            CatalogItem::Part(p) => p.price,
        }
    }

    pub fn stock_country(&self) -> StockCountry {
        match self {
            CatalogItem::Equipment(e) => e.stock_country,
            CatalogItem::Part(p) => p.stock_country,
        }
    }

    /// Part-specific view, `None` for equipment
    pub fn as_part(&self) -> Option<&Part> {
        match self {
            CatalogItem::Part(p) => Some(p),
            CatalogItem::Equipment(_) => None,
        }
    }

    /// Identity used for result deduplication and detail-view routing
    pub fn route_key(&self) -> (ItemKind, &str) {
        (self.kind(), self.id())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_json_round_trip() {
        let json = r#"{
            "id": "g1",
            "title": "Caterpillar 140M Motor Grader",
            "brand": "Cat",
            "model": "140M",
            "price": 185000,
            "year": 2018,
            "images": ["https://img.example/1.jpg"],
            "isSold": false,
            "stockCountry": "EU"
        }"#;
        let eq: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(eq.model.as_deref(), Some("140M"));
        assert_eq!(eq.stock_country, StockCountry::Eu);
        assert!(!eq.is_sold);
    }

    #[test]
    fn test_part_json_with_missing_optionals() {
        let json = r#"{
            "id": "p1",
            "title": "Edge Cutting Blade",
            "price": 340.5,
            "partNumber": "1R-0742",
            "stockQuantity": 15,
            "stockCountry": "Kenya"
        }"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert_eq!(part.part_number, "1R-0742");
        assert!(part.brand.is_none());
        assert!(part.compatible_models.is_empty());
        assert_eq!(part.stock_country, StockCountry::Kenya);
    }

    #[test]
    fn test_stock_country_codes() {
        assert_eq!(
            serde_json::to_string(&StockCountry::Us).unwrap(),
            "\"US\""
        );
        assert_eq!(
            serde_json::from_str::<StockCountry>("\"Kenya\"").unwrap(),
            StockCountry::Kenya
        );
    }

    #[test]
    fn test_route_key_distinguishes_kinds() {
        let eq = fixtures::equipment("7", "140M grader", Some("140M"));
        let part = fixtures::part("7", "1R-0742", "Cat", 3);
        assert_ne!(eq.route_key(), part.route_key());
    }
}
