//! Domain and wire models
//!
//! `country` holds the record served to clients and the upstream payload it
//! is mapped from; `requests`/`responses` are the HTTP DTOs.

pub mod country;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use country::{Country, RestCountryResponse};
pub use requests::SearchQuery;
pub use responses::{ErrorResponse, HealthResponse};
