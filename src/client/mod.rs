//! Upstream Client Module
//!
//! Resolves country names against a third-party REST API.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Country;

mod rest_countries;

pub use rest_countries::{ClientConfig, RestCountriesClient, DEFAULT_BASE_URL};

// == Country Source Trait ==
/// Anything that can resolve a country name into a [`Country`].
///
/// Implementations classify failures as `NotFound`, `Timeout`, `Upstream` or
/// `Internal`; callers propagate them unchanged.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Looks up a single country by its full name.
    async fn search_by_name(&self, name: &str) -> Result<Country>;
}
