//! Country lookup service
//!
//! Normalizes the requested name, consults the cache and falls back to the
//! upstream source on a miss. Only successful lookups are cached.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::Cache;
use crate::client::CountrySource;
use crate::error::{LookupError, Result};
use crate::models::Country;

/// Cache key for a country name: trimmed and lowercased, so spellings that
/// differ only in case or surrounding whitespace share an entry.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// == Country Service ==
/// Cache-aside lookup of countries by name.
#[derive(Clone)]
pub struct CountryService {
    source: Arc<dyn CountrySource>,
    cache: Arc<dyn Cache<Country>>,
}

impl CountryService {
    /// Creates a service over the given upstream source and cache.
    pub fn new(source: Arc<dyn CountrySource>, cache: Arc<dyn Cache<Country>>) -> Self {
        Self { source, cache }
    }

    /// Looks up a country by name.
    ///
    /// # Errors
    /// - `InvalidRequest` if `name` is empty after trimming
    /// - any error from the upstream source, unchanged and uncached
    pub async fn search_country(&self, name: &str) -> Result<Country> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidRequest(
                "country name cannot be empty".to_string(),
            ));
        }

        let key = normalize_key(name);

        if let Some(country) = self.cache.get(&key).await {
            debug!(country = %name, key = %key, "Cache hit");
            return Ok(country);
        }
        debug!(country = %name, key = %key, "Cache miss");

        let country = self.source.search_by_name(name).await?;

        self.cache.set(key, country.clone()).await;
        info!(country = %name, "Cached country data");

        Ok(country)
    }
}
