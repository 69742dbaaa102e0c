//! View model for one rendered page.
//!
//! Every render is a pure function of the incoming [`PageRequest`]; nothing is
//! remembered between requests. Upstream calls run one after another, and any
//! failure becomes a [`Notice`] instead of an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    Config, FetchError,
    geocoding::{self, Geocoder, MIN_QUERY_CHARS, Suggestions, geocoder_from_config},
    model::{Location, WeatherCard},
    provider::{WeatherProvider, provider_from_config},
};

pub const CARD_UNAVAILABLE: &str = "Unable to fetch weather data for this location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Request-scoped session state: what the user typed and what they picked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageRequest {
    /// Search box contents.
    pub q: Option<String>,
    /// Set when the search button was pressed.
    #[serde(default)]
    pub search: bool,
    /// A clicked suggestion, carried as name plus coordinates.
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl PageRequest {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn selected(&self) -> Option<Location> {
        match (&self.name, self.lat, self.lon) {
            (Some(name), Some(lat), Some(lon)) => Some(Location::new(name.clone(), lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub card: Option<WeatherCard>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub query: String,
    pub suggestions: Vec<Location>,
    pub notices: Vec<Notice>,
    pub result: Option<WeatherCard>,
    pub strategic: Vec<WeatherCard>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    weather: Arc<dyn WeatherProvider>,
    geocoder: Arc<dyn Geocoder>,
    presets: Vec<Location>,
    image_base: String,
    suggestion_count: usize,
}

impl Dashboard {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        geocoder: Arc<dyn Geocoder>,
        config: &Config,
    ) -> Self {
        Self {
            weather,
            geocoder,
            presets: config.locations.clone(),
            image_base: config.endpoints.image.clone(),
            suggestion_count: config.suggestion_count,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?, geocoder_from_config(config)?, config))
    }

    pub fn presets(&self) -> &[Location] {
        &self.presets
    }

    pub async fn card(&self, location: Location) -> Result<WeatherCard, FetchError> {
        match self.weather.current(location.latitude, location.longitude).await {
            Ok(conditions) => Ok(WeatherCard::new(location, conditions, &self.image_base)),
            Err(err) => {
                tracing::warn!(%err, location = %location.name, "Weather fetch failed");
                Err(err)
            }
        }
    }

    /// Cards for every strategic location that could be fetched.
    pub async fn strategic(&self) -> (Vec<WeatherCard>, Vec<Notice>) {
        let mut cards = Vec::with_capacity(self.presets.len());
        let mut notices = Vec::new();

        for location in &self.presets {
            match self.card(location.clone()).await {
                Ok(card) => cards.push(card),
                Err(err) => notices.push(Notice::error(err.weather_message())),
            }
        }

        (cards, notices)
    }

    pub async fn suggestions(&self, query: &str) -> Suggestions {
        geocoding::suggest(self.geocoder.as_ref(), query, self.suggestion_count).await
    }

    /// Fetch the card for an already-known location, with the notices to show alongside it.
    pub async fn lookup(&self, location: Location) -> SearchOutcome {
        match self.card(location).await {
            Ok(card) => SearchOutcome {
                notices: vec![Notice::success(format!(
                    "Found weather data for {}",
                    card.location.name
                ))],
                card: Some(card),
            },
            Err(err) => SearchOutcome {
                card: None,
                notices: vec![
                    Notice::error(err.weather_message()),
                    Notice::error(CARD_UNAVAILABLE),
                ],
            },
        }
    }

    /// Resolve a typed name and fetch its weather.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        match geocoding::resolve(self.geocoder.as_ref(), query).await {
            Ok(location) => self.lookup(location).await,
            Err(err @ FetchError::NotFound(_)) => SearchOutcome {
                card: None,
                notices: vec![Notice::warning(err.geocoding_message())],
            },
            Err(err) => {
                tracing::warn!(%err, query, "Geocoding failed");
                SearchOutcome { card: None, notices: vec![Notice::error(err.geocoding_message())] }
            }
        }
    }

    pub async fn render(&self, request: &PageRequest) -> Page {
        let mut query = request.query().to_string();
        let mut notices = Vec::new();
        let mut suggestions = Vec::new();

        if query.trim().chars().count() >= MIN_QUERY_CHARS {
            let found = self.suggestions(&query).await;
            suggestions = found.locations;
            notices.extend(found.error.map(Notice::error));
        }

        let outcome = if let Some(selected) = request.selected() {
            query = selected.name.clone();
            Some(self.lookup(selected).await)
        } else if request.search && !query.trim().is_empty() {
            Some(self.search(&query).await)
        } else {
            None
        };

        let result = outcome.and_then(|o| {
            notices.extend(o.notices);
            o.card
        });

        let (strategic, strategic_notices) = self.strategic().await;
        notices.extend(strategic_notices);

        Page { query, suggestions, notices, result, strategic, generated_at: Utc::now() }
    }
}
