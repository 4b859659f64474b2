//! API Handlers
//!
//! HTTP request handlers for each lookup server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Method,
    Json,
};
use tracing::info;

use crate::error::{LookupError, Result};
use crate::models::{Country, HealthResponse, SearchQuery};
use crate::service::CountryService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed lookup service
    pub service: Arc<CountryService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: CountryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for /api/countries/search
///
/// Routed for every method so that non-GET requests get a 400 body in the
/// same shape as other validation errors.
pub async fn search_handler(
    method: Method,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Country>> {
    if method != Method::GET {
        return Err(LookupError::InvalidRequest(
            "Only GET method is supported".to_string(),
        ));
    }

    if let Some(error_msg) = query.validate() {
        return Err(LookupError::InvalidRequest(error_msg));
    }
    let name = query.name.unwrap_or_default();

    info!(country = %name, "Searching for country");
    let country = state.service.search_country(&name).await?;

    Ok(Json(country))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
