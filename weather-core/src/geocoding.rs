//! Name-to-coordinates lookup.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{Config, error::FetchError, model::Location, provider::truncate_body};

/// Queries shorter than this never reach the geocoder.
pub const MIN_QUERY_CHARS: usize = 2;

/// A raw geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// State or province.
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodedPlace {
    /// `"Name, Admin1, Country"`, skipping whichever parts are absent.
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(
            [self.admin1.as_deref(), self.country.as_deref()]
                .into_iter()
                .flatten()
                .filter(|p| !p.is_empty()),
        );
        parts.join(", ")
    }

    pub fn into_location(self, labelled: bool) -> Location {
        let name = if labelled { self.label() } else { self.name };
        Location { name, latitude: self.latitude, longitude: self.longitude }
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Look up places matching `query`, in the order the service ranks them.
    async fn search(&self, query: &str, max_results: usize)
    -> Result<Vec<GeocodedPlace>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Open-Meteo geocoding")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent entirely when nothing matched.
    #[serde(default)]
    results: Vec<GeocodedPlace>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[tracing::instrument(skip(self))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<GeocodedPlace>, FetchError> {
        let url = format!("{}/v1/search", self.base_url);
        let count = max_results.to_string();
        tracing::debug!(%url, "Searching locations");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            tracing::warn!(%status, "Geocoding request failed");
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(parsed.results)
    }
}

pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn Geocoder>> {
    let geocoder = OpenMeteoGeocoder::new(&config.endpoints.geocoding, config.timeout())?;
    Ok(Arc::new(geocoder))
}

/// Suggestion list for a partially typed query.
///
/// Failures never surface as errors: the list is empty and `error` carries
/// the message to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    pub locations: Vec<Location>,
    pub error: Option<String>,
}

pub async fn suggest(geocoder: &dyn Geocoder, query: &str, max_results: usize) -> Suggestions {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Suggestions::default();
    }

    match geocoder.search(query, max_results).await {
        Ok(places) => Suggestions {
            locations: places.into_iter().map(|p| p.into_location(true)).collect(),
            error: None,
        },
        Err(err) => {
            tracing::warn!(%err, query, "Suggestion lookup failed");
            Suggestions {
                locations: Vec::new(),
                error: Some(format!("Error fetching suggestions: {err}")),
            }
        }
    }
}

/// Resolve a searched name to the best-ranked location.
pub async fn resolve(geocoder: &dyn Geocoder, query: &str) -> Result<Location, FetchError> {
    let query = query.trim();
    geocoder
        .search(query, 1)
        .await?
        .into_iter()
        .next()
        .map(|place| place.into_location(false))
        .ok_or_else(|| FetchError::NotFound(query.to_string()))
}
