//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries every `ttl / 2`

mod sweep;

pub use sweep::spawn_sweep_task;
