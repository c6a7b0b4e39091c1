//! partscout CLI
//!
//! Command-line search over a road-grader marketplace catalog:
//! - `search` - facet filtering, fuzzy/part-number/model/description
//!   matching, ranked and capped results
//! - `listings` - raw endpoint dumps with server-side filters

mod cache;
mod catalog;
mod cli;
mod error;
mod http;
mod limiter;
mod search;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stderr logging keeps stdout clean for the rendered results
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Search(args)) => execute_search_cli(args).await,
        Some(Commands::Listings(args)) => execute_listings_cli(args).await,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e.message());
            std::process::exit(get_exit_code(&e));
        }
    }
}

async fn execute_search_cli(args: cli::SearchArgs) -> Result<String, AppError> {
    use tokio::time::{timeout, Duration};

    let result = timeout(Duration::from_secs(120), tools::search::execute_search(args)).await;
    match result {
        Ok(inner) => inner,
        Err(_) => Err(AppError::Timeout(
            "Request exceeded 120 second timeout".to_string(),
        )),
    }
}

async fn execute_listings_cli(args: cli::ListingsArgs) -> Result<String, AppError> {
    use tokio::time::{timeout, Duration};

    let result = timeout(
        Duration::from_secs(120),
        tools::listings::execute_listings(args),
    )
    .await;
    match result {
        Ok(inner) => inner,
        Err(_) => Err(AppError::Timeout(
            "Request exceeded 120 second timeout".to_string(),
        )),
    }
}

/// Map application errors to exit codes
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) => 1,
        AppError::CatalogFetchFailed(_) | AppError::RateLimited(_) => 2,
        AppError::NotFound(_) => 3,
        AppError::Timeout(_) => 4,
        AppError::CatalogParseFailed(_) | AppError::CacheError(_) | AppError::Internal(_) => 5,
    }
}
