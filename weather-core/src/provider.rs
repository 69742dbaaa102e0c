use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{Config, CurrentConditions, FetchError, provider::openmeteo::OpenMeteoProvider};

pub mod openmeteo;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a coordinate pair.
    async fn current(&self, latitude: f64, longitude: f64)
    -> Result<CurrentConditions, FetchError>;
}

/// Construct the weather provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(&config.endpoints.weather, config.timeout())?;
    Ok(Arc::new(provider))
}

/// Cut a response body down to something fit for an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
