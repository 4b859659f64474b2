//! Country Lookup - a caching proxy for country metadata
//!
//! Serves `GET /api/countries/search?name=<string>` backed by the REST
//! Countries API and a time-bounded in-memory cache.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use country_lookup::api::{create_router, AppState};
use country_lookup::cache::ExpiringCache;
use country_lookup::client::{ClientConfig, RestCountriesClient};
use country_lookup::config::Config;
use country_lookup::models::Country;
use country_lookup::service::CountryService;

/// Main entry point for the country lookup server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start its expiry sweep
/// 4. Build the upstream client and lookup service
/// 5. Create Axum router with all endpoints
/// 6. Serve until SIGINT/SIGTERM, then drain within the grace period
/// 7. Stop the expiry sweep
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "country_lookup=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Country Lookup Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, client_timeout={}s, upstream={}",
        config.server_port, config.cache_ttl, config.client_timeout, config.upstream_base_url
    );

    let cache: Arc<ExpiringCache<Country>> = Arc::new(ExpiringCache::new(config.cache_ttl()));
    cache.start();
    info!(
        "Cache initialized, sweeping every {}ms",
        cache.sweep_interval().as_millis()
    );

    let client = RestCountriesClient::new(ClientConfig {
        base_url: config.upstream_base_url.clone(),
        timeout: config.client_timeout(),
    })
    .context("failed to build upstream client")?;
    info!(
        "Upstream client ready, timeout {}ms",
        client.timeout().as_millis()
    );

    let service = CountryService::new(Arc::new(client), cache.clone());
    let app = create_router(AppState::new(service), config.request_timeout());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result.context("server error")?,
        _ = grace_period_elapsed(signalled_rx, config.shutdown_grace()) => {
            warn!(
                "In-flight requests did not finish within {}s, forcing shutdown",
                config.shutdown_grace
            );
        }
    }

    cache.stop();
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves `grace` after the shutdown signal fires; never resolves otherwise.
async fn grace_period_elapsed(signalled: oneshot::Receiver<()>, grace: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
