//! Lookup Service Module
//!
//! Sits between the HTTP handlers and the upstream client, serving repeat
//! lookups from the cache.

mod country_service;

pub use country_service::{normalize_key, CountryService};
