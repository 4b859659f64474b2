//! Country Lookup - a caching proxy for country metadata
//!
//! Looks up capital, currency and population by country name via the REST
//! Countries API, keeping results in a time-bounded in-memory cache.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use cache::ExpiringCache;
pub use config::Config;
pub use service::CountryService;
