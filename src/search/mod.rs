//! Catalog search: facet filtering, text matching, ranking, highlighting

pub mod engine;
pub mod facet;
pub mod fuzzy;
pub mod highlight;
pub mod matcher;
pub mod query;
pub mod ranking;

pub use engine::{SearchEngine, SearchHit};
pub use highlight::highlight_term;
pub use query::{SearchMode, SearchQuery, StockFilter};
