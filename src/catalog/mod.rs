//! Catalog data model and API client

pub mod client;
pub mod items;

pub use client::{CatalogClient, ListingFilter};
pub use items::CatalogItem;
