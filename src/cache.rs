//! On-disk cache for fetched catalog snapshots
//!
//! Layout: {cache_dir}/{origin-slug}/{endpoint}.json plus a metadata file
//! carrying the fetch time and TTL. Writes go through a .tmp file and an
//! atomic rename under an fs2 lock so concurrent invocations never observe
//! a torn snapshot.

use crate::error::AppError;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Metadata stored alongside each cached endpoint payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub origin: String,
    pub endpoint: String,
    pub etag: Option<String>,
    pub cached_at: u64,
    pub ttl_minutes: u64,
}

impl CacheMetadata {
    pub fn new(origin: String, endpoint: String, ttl_minutes: u64) -> Self {
        Self {
            origin,
            endpoint,
            etag: None,
            cached_at: unix_now(),
            ttl_minutes,
        }
    }

    pub fn with_etag(mut self, etag: Option<String>) -> Self {
        self.etag = etag;
        self
    }

    pub fn is_fresh(&self) -> bool {
        let age = unix_now().saturating_sub(self.cached_at);
        age < self.ttl_minutes * 60
    }
}

/// Cache over a platform-specific (or test-supplied) directory
pub struct CatalogCache {
    cache_dir: PathBuf,
}

impl CatalogCache {
    /// Cache rooted at the platform cache directory
    pub fn new() -> Result<Self> {
        Self::at(default_cache_dir()?)
    }

    /// Cache rooted at an explicit directory
    pub fn at(cache_dir: PathBuf) -> Result<Self> {
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
            info!("Created cache directory: {}", cache_dir.display());
        }
        Ok(Self { cache_dir })
    }

    fn entry_paths(&self, origin: &str, endpoint: &str) -> (PathBuf, PathBuf) {
        let dir = self.cache_dir.join(origin_slug(origin));
        (
            dir.join(format!("{endpoint}.json")),
            dir.join(format!("{endpoint}.meta.json")),
        )
    }

    fn read_metadata(&self, origin: &str, endpoint: &str) -> Option<CacheMetadata> {
        let (_, meta_path) = self.entry_paths(origin, endpoint);
        let raw = fs::read_to_string(meta_path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Read the cached payload for an endpoint if it exists and is within
    /// its TTL
    pub fn read_fresh(&self, origin: &str, endpoint: &str) -> Option<String> {
        let metadata = self.read_metadata(origin, endpoint)?;
        if !metadata.is_fresh() {
            debug!("Cache for {}/{} expired", origin, endpoint);
            return None;
        }
        let (payload_path, _) = self.entry_paths(origin, endpoint);
        fs::read_to_string(payload_path).ok()
    }

    /// Store an endpoint payload and its metadata atomically
    pub fn store(
        &self,
        origin: &str,
        endpoint: &str,
        payload: &str,
        metadata: CacheMetadata,
    ) -> Result<(), AppError> {
        let (payload_path, meta_path) = self.entry_paths(origin, endpoint);
        if let Some(parent) = payload_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_path = payload_path.with_extension("lock");
        let lock_file = fs::File::create(&lock_path)?;
        lock_file.lock_exclusive()?;

        let payload_tmp = payload_path.with_extension("json.tmp");
        let meta_tmp = meta_path.with_extension("json.tmp");
        fs::write(&payload_tmp, payload)?;
        fs::write(&meta_tmp, serde_json::to_string_pretty(&metadata)?)?;
        fs::rename(&payload_tmp, &payload_path)?;
        fs::rename(&meta_tmp, &meta_path)?;

        lock_file.unlock()?;
        let _ = fs::remove_file(lock_path);

        debug!("Cached {}/{} ({} bytes)", origin, endpoint, payload.len());
        Ok(())
    }

    /// Remove every entry for an origin, used by `--refresh`
    pub fn evict_origin(&self, origin: &str) -> Result<(), AppError> {
        let dir = self.cache_dir.join(origin_slug(origin));
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            info!("Evicted cache for {}", origin);
        }
        Ok(())
    }
}

/// Filesystem-safe directory name for an origin URL
fn origin_slug(origin: &str) -> String {
    origin
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Platform-specific cache directory
fn default_cache_dir() -> Result<PathBuf> {
    if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
        Ok(PathBuf::from(xdg_cache).join("partscout"))
    } else if let Some(home) = dirs::home_dir() {
        if cfg!(target_os = "windows") {
            if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
                Ok(PathBuf::from(local_appdata).join("partscout"))
            } else {
                Ok(home.join("AppData").join("Local").join("partscout"))
            }
        } else {
            Ok(home.join(".cache").join("partscout"))
        }
    } else {
        Ok(Path::new(".cache").join("partscout"))
    }
}
