//! Country models
//!
//! [`Country`] is what this service caches and returns. The `Rest*` types
//! mirror the subset of the upstream REST Countries payload that is read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Country metadata returned by `GET /api/countries/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Common name, e.g. "India"
    pub name: String,
    /// First listed capital, empty if the country has none
    pub capital: String,
    /// Symbol of the first listed currency, empty if unknown
    pub currency: String,
    /// Population count
    pub population: u64,
}

/// One element of the upstream `/name/{name}` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct RestCountryResponse {
    pub name: RestCountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    /// Keyed by ISO 4217 code; ordered so the "first" currency is stable.
    #[serde(default)]
    pub currencies: BTreeMap<String, RestCurrency>,
    #[serde(default)]
    pub population: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestCountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestCurrency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl From<RestCountryResponse> for Country {
    fn from(resp: RestCountryResponse) -> Self {
        Self {
            name: resp.name.common,
            capital: resp.capital.into_iter().next().unwrap_or_default(),
            currency: resp
                .currencies
                .into_values()
                .next()
                .map(|c| c.symbol)
                .unwrap_or_default(),
            population: resp.population,
        }
    }
}
