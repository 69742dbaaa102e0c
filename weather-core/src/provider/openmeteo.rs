use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::FetchError,
    model::CurrentConditions,
    provider::{WeatherProvider, truncate_body},
};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: i64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

impl From<OmCurrent> for CurrentConditions {
    fn from(current: OmCurrent) -> Self {
        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok());

        Self {
            temperature_c: current.temperature_2m,
            humidity_pct: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
            weather_code: current.weather_code,
            observed_at,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[tracing::instrument(skip(self))]
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, FetchError> {
        let url = format!("{}/v1/forecast", self.base_url);
        tracing::debug!(%url, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            tracing::warn!(%status, "Open-Meteo forecast request failed");
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(parsed.current.into())
    }
}
