//! Core library for the strategic weather monitor.
//!
//! This crate defines:
//! - Configuration handling (endpoints, timeout, preset locations)
//! - Clients for the Open-Meteo weather and geocoding APIs
//! - The weather-code table and alert classifier
//! - A render-per-request dashboard view model
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod alert;
pub mod codes;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocoding;
pub mod image;
pub mod model;
pub mod provider;

pub use alert::{Alert, AlertTier};
pub use config::{Config, Endpoints};
pub use dashboard::{Dashboard, Notice, NoticeLevel, Page, PageRequest, SearchOutcome};
pub use error::FetchError;
pub use geocoding::{GeocodedPlace, Geocoder, OpenMeteoGeocoder, Suggestions};
pub use model::{CurrentConditions, Location, WeatherCard};
pub use provider::{WeatherProvider, openmeteo::OpenMeteoProvider};
