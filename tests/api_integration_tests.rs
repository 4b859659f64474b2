//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle through the router, with the upstream
//! replaced by an in-process fake that counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use country_lookup::{
    api::create_router,
    cache::ExpiringCache,
    client::CountrySource,
    error::{LookupError, Result},
    models::Country,
    AppState, CountryService,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Types ==

/// Upstream fake knowing a single country; counts every call.
struct FakeUpstream {
    calls: AtomicUsize,
}

impl FakeUpstream {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountrySource for FakeUpstream {
    async fn search_by_name(&self, name: &str) -> Result<Country> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match name.to_lowercase().as_str() {
            "india" => Ok(Country {
                name: "India".to_string(),
                capital: "New Delhi".to_string(),
                currency: "₹".to_string(),
                population: 1_417_492_000,
            }),
            "slowland" => Err(LookupError::Timeout),
            "brokenland" => Err(LookupError::Upstream("status code 503".to_string())),
            _ => Err(LookupError::NotFound(name.to_string())),
        }
    }
}

// == Helper Functions ==

fn create_test_app(ttl: Duration) -> (Router, Arc<FakeUpstream>, Arc<ExpiringCache<Country>>) {
    let upstream = FakeUpstream::new();
    let cache: Arc<ExpiringCache<Country>> = Arc::new(ExpiringCache::new(ttl));
    let service = CountryService::new(upstream.clone(), cache.clone());
    let app = create_router(AppState::new(service), Duration::from_secs(5));
    (app, upstream, cache)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Search Endpoint Tests ==

#[tokio::test]
async fn test_search_success() {
    let (app, upstream, _) = create_test_app(Duration::from_secs(60));

    let (status, json) = get(&app, "/api/countries/search?name=India").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "India");
    assert_eq!(json["capital"], "New Delhi");
    assert_eq!(json["currency"], "₹");
    assert_eq!(json["population"], 1_417_492_000u64);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_search_is_cached_across_spellings() {
    let (app, upstream, cache) = create_test_app(Duration::from_secs(60));

    let (status, _) = get(&app, "/api/countries/search?name=India").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get(&app, "/api/countries/search?name=%20%20iNDIA%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "India");

    assert_eq!(upstream.calls(), 1);
    assert_eq!(cache.size().await, 1);
    assert!(cache.get("india").await.is_some());
}

#[tokio::test]
async fn test_search_refetches_after_expiry() {
    let (app, upstream, _) = create_test_app(Duration::from_millis(50));

    get(&app, "/api/countries/search?name=India").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    get(&app, "/api/countries/search?name=India").await;

    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_search_missing_name() {
    let (app, upstream, _) = create_test_app(Duration::from_secs(60));

    let (status, json) = get(&app, "/api/countries/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid request");
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_search_empty_name() {
    let (app, _, _) = create_test_app(Duration::from_secs(60));

    let (status, _) = get(&app, "/api/countries/search?name=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_wrong_method() {
    let (app, upstream, _) = create_test_app(Duration::from_secs(60));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/countries/search?name=India")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_search_not_found_is_not_cached() {
    let (app, upstream, cache) = create_test_app(Duration::from_secs(60));

    let (status, json) = get(&app, "/api/countries/search?name=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Country not found");

    let (status, _) = get(&app, "/api/countries/search?name=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(upstream.calls(), 2);
    assert_eq!(cache.size().await, 0);
}

#[tokio::test]
async fn test_search_upstream_timeout() {
    let (app, _, cache) = create_test_app(Duration::from_secs(60));

    let (status, json) = get(&app, "/api/countries/search?name=Slowland").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "Timeout");
    assert_eq!(cache.size().await, 0);
}

#[tokio::test]
async fn test_search_upstream_failure() {
    let (app, _, _) = create_test_app(Duration::from_secs(60));

    let (status, _) = get(&app, "/api/countries/search?name=Brokenland").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app(Duration::from_secs(60));

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"status": "healthy"}));
}

// == Concurrency Tests ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups_share_cache() {
    let (app, upstream, cache) = create_test_app(Duration::from_secs(60));
    cache.start();

    // Warm the cache so every concurrent request is a hit
    get(&app, "/api/countries/search?name=India").await;

    let mut handles = Vec::new();
    for i in 0..50 {
        let app = app.clone();
        let uri = if i % 2 == 0 {
            "/api/countries/search?name=india"
        } else {
            "/api/countries/search?name=INDIA"
        };
        handles.push(tokio::spawn(async move { get(&app, uri).await.0 }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(upstream.calls(), 1);
    cache.stop();
}
