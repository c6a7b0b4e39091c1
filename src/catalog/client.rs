//! HTTP client for the marketplace catalog API
//!
//! Fetches grader and part listings from `GET /api/graders` and
//! `GET /api/parts`. Responses are cached on disk and every network
//! attempt passes the per-origin rate limiter first; a fresh cache hit
//! consumes no limiter slot.

use crate::cache::{CacheMetadata, CatalogCache};
use crate::catalog::items::{CatalogItem, Equipment, Part};
use crate::limiter::{Decision, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Cached snapshots stay valid this long before a refetch
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 10;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("rate limited, retry after {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("cache error: {0}")]
    Cache(String),
}

/// Server-side filter parameters understood by both listing endpoints
#[derive(Debug, Default, Clone)]
pub struct ListingFilter {
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub is_sold: Option<bool>,
    pub stock_country: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListingFilter {
    fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(brand) = &self.brand {
            pairs.append_pair("brand", brand);
        }
        if let Some(min) = self.min_price {
            pairs.append_pair("minPrice", &min.to_string());
        }
        if let Some(max) = self.max_price {
            pairs.append_pair("maxPrice", &max.to_string());
        }
        if let Some(sold) = self.is_sold {
            pairs.append_pair("isSold", if sold { "true" } else { "false" });
        }
        if let Some(country) = &self.stock_country {
            pairs.append_pair("stockCountry", country);
        }
        if let Some(search) = &self.search {
            pairs.append_pair("search", search);
        }
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(offset) = self.offset {
            pairs.append_pair("offset", &offset.to_string());
        }
    }

    fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.is_sold.is_none()
            && self.stock_country.is_none()
            && self.search.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

/// Catalog API client with on-disk caching and client-side rate limiting
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    cache: Option<CatalogCache>,
    limiter: RateLimiter,
    ttl_minutes: u64,
}

impl CatalogClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            cache: None,
            limiter: RateLimiter::new(),
            ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
        })
    }

    pub fn with_cache(mut self, cache: CatalogCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    fn origin(&self) -> String {
        let mut origin = format!(
            "{}://{}",
            self.base_url.scheme(),
            self.base_url.host_str().unwrap_or("localhost")
        );
        if let Some(port) = self.base_url.port() {
            origin.push_str(&format!(":{port}"));
        }
        origin
    }

    /// Drop any cached snapshots for this origin
    pub fn evict_cache(&self) -> Result<(), CatalogError> {
        if let Some(cache) = &self.cache {
            cache
                .evict_origin(&self.origin())
                .map_err(|e| CatalogError::Cache(e.to_string()))?;
        }
        Ok(())
    }

    /// Fetch grader listings
    pub async fn fetch_graders(
        &mut self,
        filter: &ListingFilter,
    ) -> Result<Vec<Equipment>, CatalogError> {
        self.fetch_endpoint("graders", filter).await
    }

    /// Fetch part listings
    pub async fn fetch_parts(&mut self, filter: &ListingFilter) -> Result<Vec<Part>, CatalogError> {
        self.fetch_endpoint("parts", filter).await
    }

    /// Fetch both endpoints and merge into a single searchable snapshot,
    /// graders first
    pub async fn fetch_catalog(
        &mut self,
        filter: &ListingFilter,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let graders = self.fetch_graders(filter).await?;
        let parts = self.fetch_parts(filter).await?;
        info!(
            graders = graders.len(),
            parts = parts.len(),
            "Fetched catalog snapshot"
        );

        let mut items: Vec<CatalogItem> =
            graders.into_iter().map(CatalogItem::Equipment).collect();
        items.extend(parts.into_iter().map(CatalogItem::Part));
        Ok(items)
    }

    async fn fetch_endpoint<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        filter: &ListingFilter,
    ) -> Result<Vec<T>, CatalogError> {
        let origin = self.origin();

        // Only unfiltered snapshots are cacheable; parameterised fetches go
        // straight to the network.
        if filter.is_empty() {
            if let Some(payload) = self
                .cache
                .as_ref()
                .and_then(|c| c.read_fresh(&origin, endpoint))
            {
                debug!("Cache hit for {}/{}", origin, endpoint);
                return Ok(serde_json::from_str(&payload)?);
            }
        }

        match self.limiter.check(&origin) {
            Decision::Allowed => {}
            Decision::Limited { retry_after } => {
                return Err(CatalogError::RateLimited { retry_after });
            }
        }

        let mut url = self.base_url.join(&format!("api/{endpoint}"))?;
        filter.apply(&mut url);
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Api { status, body });
        }

        let items: Vec<T> = serde_json::from_str(&body)?;

        if filter.is_empty() {
            if let Some(cache) = &self.cache {
                let metadata = CacheMetadata::new(
                    origin.clone(),
                    endpoint.to_string(),
                    self.ttl_minutes,
                )
                .with_etag(etag);
                if let Err(err) = cache.store(&origin, endpoint, &body, metadata) {
                    // Stale cache is tolerable; a failed write must not fail
                    // the fetch.
                    debug!("Cache store failed for {}/{}: {}", origin, endpoint, err);
                }
            }
        }

        Ok(items)
    }
}
