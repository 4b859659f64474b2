//! Request DTOs for the lookup API
//!
//! Defines the query parameters accepted by the search endpoint.

use serde::Deserialize;

/// Query string for `GET /api/countries/search?name=<string>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Country name to look up
    #[serde(default)]
    pub name: Option<String>,
}

impl SearchQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.name.as_deref().map(str::trim) {
            None | Some("") => Some("Query parameter 'name' is required".to_string()),
            Some(_) => None,
        }
    }
}
