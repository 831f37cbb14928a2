//! Remote requirement definition fetching.
//!
//! Definitions can be published at an `http(s)://` URL and shared between
//! students. Responses are cached on disk keyed by the URL hash.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Whether a requirements location is a URL rather than a path.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches remote requirement definitions with caching.
///
/// # Example
///
/// ```no_run
/// use gradcheck::requirements::RemoteFetcher;
/// use std::time::Duration;
///
/// let fetcher = RemoteFetcher::new(Duration::from_secs(30));
/// let content = fetcher.fetch("https://example.com/requirements.yml").unwrap();
/// ```
pub struct RemoteFetcher {
    timeout: Duration,
    cache_dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl RemoteFetcher {
    /// Create a fetcher caching under the system temp directory.
    pub fn new(timeout: Duration) -> Self {
        let cache_dir = std::env::temp_dir()
            .join("gradcheck")
            .join("remote-requirements");
        Self::with_cache_dir(timeout, cache_dir)
    }

    /// Create a fetcher with a custom cache directory.
    pub fn with_cache_dir(timeout: Duration, cache_dir: PathBuf) -> Self {
        Self {
            timeout,
            cache_dir,
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch a definition, serving from cache when available.
    pub fn fetch(&self, url: &str) -> Result<String> {
        if let Some(cached) = self.check_cache(url)? {
            tracing::debug!("Using cached requirements for {}", url);
            return Ok(cached);
        }

        let content = self.fetch_remote(url)?;
        self.save_cache(url, &content)?;

        Ok(content)
    }

    /// Fetch a definition, bypassing and refreshing the cache.
    pub fn fetch_fresh(&self, url: &str) -> Result<String> {
        let content = self.fetch_remote(url)?;
        self.save_cache(url, &content)?;
        Ok(content)
    }

    fn fetch_remote(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching requirements from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }

        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }

    fn check_cache(&self, url: &str) -> Result<Option<String>> {
        let cache_path = self.cache_path(url);
        if cache_path.exists() {
            let content = std::fs::read_to_string(&cache_path)?;
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }

    fn save_cache(&self, url: &str, content: &str) -> Result<()> {
        let cache_path = self.cache_path(url);
        if let Some(parent) = cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&cache_path, content)?;
        Ok(())
    }

    fn cache_path(&self, url: &str) -> PathBuf {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let hash = hex::encode(hasher.finalize());
        self.cache_dir.join(format!("{}.txt", hash))
    }

    /// Remove the cached copy of a URL.
    pub fn clear_cache(&self, url: &str) -> Result<()> {
        let cache_path = self.cache_path(url);
        if cache_path.exists() {
            std::fs::remove_file(&cache_path)?;
        }
        Ok(())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for RemoteFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
