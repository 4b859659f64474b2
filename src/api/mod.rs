//! API Module
//!
//! HTTP handlers and routing for the lookup server REST API.
//!
//! # Endpoints
//! - `GET /api/countries/search?name=<string>` - Look up a country by name
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
