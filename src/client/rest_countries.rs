//! REST Countries client
//!
//! Translates a name into `GET {base}/name/{name}?fullText=true`, parses the
//! JSON array and maps the first element to a [`Country`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::client::CountrySource;
use crate::error::{LookupError, Result};
use crate::models::{Country, RestCountryResponse};

/// Public REST Countries v3.1 endpoint
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Default upstream request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`RestCountriesClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the `/name/{name}` path is appended to
    pub base_url: String,
    /// Whole-request timeout, covering connect and body read; zero means
    /// the default
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// == REST Countries Client ==
/// HTTP client for the REST Countries API.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    base_url: Url,
    timeout: Duration,
    http: reqwest::Client,
}

impl RestCountriesClient {
    // == Constructor ==
    /// Builds a client from `config`.
    ///
    /// Fails if the base URL does not parse or cannot carry path segments.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            LookupError::Internal(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::Internal(format!(
                "base URL '{}' cannot have path segments",
                config.base_url
            )));
        }

        let timeout = if config.timeout.is_zero() {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            config.timeout
        };

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    /// Returns the timeout applied to each upstream request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the lookup URL, percent-encoding `name` as one path segment.
    ///
    /// `.` and `..` are rejected: the URL path would swallow them and hit a
    /// different endpoint.
    fn endpoint(&self, name: &str) -> Result<Url> {
        if name == "." || name == ".." {
            return Err(LookupError::InvalidRequest(format!(
                "'{}' is not a valid country name",
                name
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Internal("base URL cannot have path segments".to_string()))?
            .pop_if_empty()
            .push("name")
            .push(name);
        url.query_pairs_mut().append_pair("fullText", "true");
        Ok(url)
    }
}

/// Maps a reqwest transport error onto the lookup taxonomy.
fn classify_transport_error(name: &str, err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        warn!(country = %name, "Upstream request timed out");
        LookupError::Timeout
    } else {
        warn!(country = %name, error = %err, "Upstream request failed");
        LookupError::Upstream(err.to_string())
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn search_by_name(&self, name: &str) -> Result<Country> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidRequest(
                "country name cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(name)?;
        debug!(%url, "Fetching country data");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| classify_transport_error(name, e))?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                debug!(country = %name, "Country not found upstream");
                return Err(LookupError::NotFound(name.to_string()));
            }
            status => {
                warn!(country = %name, status = status.as_u16(), "Upstream returned unexpected status");
                return Err(LookupError::Upstream(format!(
                    "status code {}",
                    status.as_u16()
                )));
            }
        }

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Internal(format!("failed to read response body: {}", e))
            }
        })?;

        let countries: Vec<RestCountryResponse> = serde_json::from_slice(&body)
            .map_err(|e| LookupError::Internal(format!("failed to parse response: {}", e)))?;

        countries
            .into_iter()
            .next()
            .map(Country::from)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
