//! CLI definitions
//!
//! Command-line interface for searching the equipment and parts catalog

use crate::search::{SearchMode, StockFilter};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Partscout CLI
#[derive(Parser)]
#[command(name = "partscout")]
#[command(about = "Road grader and spare part catalog search utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search listings by part number, model, or free text
    Search(SearchArgs),
    /// Fetch and print raw listings without matching
    Listings(ListingsArgs),
}

/// Search command arguments
#[derive(Parser, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (part number, model, or free text)
    #[arg(short = 'q', long)]
    pub query: String,

    /// Field to match against
    #[arg(short = 'm', long, value_enum, default_value_t = SearchMode::All)]
    pub mode: SearchMode,

    /// Stock availability facet (parts only)
    #[arg(long, value_enum, default_value_t = StockFilter::All)]
    pub stock: StockFilter,

    /// Restrict to one or more brands (exact, case-sensitive)
    #[arg(short = 'b', long = "brand")]
    pub brands: Vec<String>,

    /// Restrict to one or more stock countries (EU, Kenya, US)
    #[arg(short = 'c', long = "country")]
    pub countries: Vec<String>,

    /// Catalog API base URL
    #[arg(long, env = "PARTSCOUT_API_URL", default_value = "http://localhost:3001")]
    pub base_url: String,

    /// Bypass the on-disk snapshot cache
    #[arg(long)]
    pub refresh: bool,
}

/// Listings command arguments
#[derive(Parser, Deserialize, Serialize, Clone, Debug)]
pub struct ListingsArgs {
    /// Endpoint to fetch: graders or parts
    #[arg(value_parser = ["graders", "parts"])]
    pub endpoint: String,

    /// Server-side brand filter
    #[arg(short = 'b', long)]
    pub brand: Option<String>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Include only sold (true) or unsold (false) listings
    #[arg(long)]
    pub sold: Option<bool>,

    /// Server-side stock country filter
    #[arg(short = 'c', long)]
    pub country: Option<String>,

    /// Page size
    #[arg(short = 'l', long)]
    pub limit: Option<u32>,

    /// Page offset
    #[arg(long)]
    pub offset: Option<u32>,

    /// Catalog API base URL
    #[arg(long, env = "PARTSCOUT_API_URL", default_value = "http://localhost:3001")]
    pub base_url: String,

    /// Bypass the on-disk snapshot cache
    #[arg(long)]
    pub refresh: bool,
}
