use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    alert::{self, Alert},
    codes, image,
};

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Current conditions at a location, exactly as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i64,
    /// Observation time in the location's local time zone.
    pub observed_at: Option<NaiveDateTime>,
}

/// Everything needed to display one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    pub location: Location,
    pub conditions: CurrentConditions,
    pub description: &'static str,
    pub alert: Alert,
    pub image_url: String,
}

impl WeatherCard {
    pub fn new(location: Location, conditions: CurrentConditions, image_base: &str) -> Self {
        let description = codes::describe(conditions.weather_code);
        let alert = alert::classify(conditions.temperature_c, conditions.wind_speed_kmh);
        let image_url = image::image_url(image_base, &location.name, description);

        Self { location, conditions, description, alert, image_url }
    }
}
