//! Error types and handling for the catalog search CLI

use serde::Serialize;
use std::fmt;

/// Application error types surfaced to the CLI layer
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    CatalogFetchFailed(String),
    CatalogParseFailed(String),
    RateLimited(String),
    NotFound(String),
    Timeout(String),
    CacheError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::CatalogFetchFailed(msg) => write!(f, "Catalog fetch failed: {}", msg),
            AppError::CatalogParseFailed(msg) => write!(f, "Catalog parse failed: {}", msg),
            AppError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::CacheError(msg) => write!(f, "Cache error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable code for logs and scripting
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::CatalogFetchFailed(_) => "catalog_fetch_failed",
            AppError::CatalogParseFailed(_) => "catalog_parse_failed",
            AppError::RateLimited(_) => "rate_limited",
            AppError::NotFound(_) => "not_found",
            AppError::Timeout(_) => "timeout",
            AppError::CacheError(_) => "cache_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            AppError::CatalogFetchFailed(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::CatalogParseFailed(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::CacheError(err.to_string())
    }
}

impl From<crate::catalog::client::CatalogError> for AppError {
    fn from(err: crate::catalog::client::CatalogError) -> Self {
        use crate::catalog::client::CatalogError;
        match err {
            CatalogError::RateLimited { retry_after } => AppError::RateLimited(format!(
                "too many catalog requests, retry in {}s",
                retry_after.as_secs().max(1)
            )),
            CatalogError::Api { status, .. } if status.as_u16() == 404 => {
                AppError::NotFound(err.to_string())
            }
            CatalogError::Decode(_) => AppError::CatalogParseFailed(err.to_string()),
            CatalogError::Http(inner) => AppError::from(inner),
            other => AppError::CatalogFetchFailed(other.to_string()),
        }
    }
}

/// Reject queries that cannot produce a sensible result before any network
/// round trip happens
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
    }

    if query.len() > 500 {
        return Err(AppError::InvalidInput(
            "Query too long, maximum 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Normalize free text with Unicode NFKC and trim surrounding whitespace
pub fn normalize_text(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfkc().collect::<String>().trim().to_string()
}
