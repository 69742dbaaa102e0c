use thiserror::Error;

/// Everything that can go wrong while talking to an upstream service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Request(String),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Parse(String),

    #[error("no results found for '{0}'")]
    NotFound(String),
}

impl FetchError {
    /// Classify a transport-level failure reported by reqwest.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }

    /// Message shown when the weather fetch fails.
    pub fn weather_message(&self) -> String {
        match self {
            FetchError::Timeout => "Request timed out. Please try again.".to_string(),
            FetchError::Parse(msg) => format!("Error parsing weather data: {msg}"),
            other => format!("Error fetching weather data: {other}"),
        }
    }

    /// Message shown when resolving a searched name fails.
    pub fn geocoding_message(&self) -> String {
        match self {
            FetchError::Status { status, .. } => {
                format!("Error accessing geocoding service: {status}")
            }
            FetchError::NotFound(query) => {
                format!("No results found for '{query}'. Please try a different location.")
            }
            other => format!("Network error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_has_dedicated_weather_message() {
        assert_eq!(FetchError::Timeout.weather_message(), "Request timed out. Please try again.");
        assert!(FetchError::Timeout.is_timeout());
    }

    #[test]
    fn parse_and_status_messages() {
        let parse = FetchError::Parse("missing field `current`".into());
        assert_eq!(parse.weather_message(), "Error parsing weather data: missing field `current`");

        let status = FetchError::Status { status: 503, body: "down".into() };
        assert!(status.weather_message().starts_with("Error fetching weather data: "));
        assert_eq!(status.geocoding_message(), "Error accessing geocoding service: 503");
    }

    #[test]
    fn not_found_message_quotes_query() {
        let err = FetchError::NotFound("Atlantis".into());
        assert_eq!(
            err.geocoding_message(),
            "No results found for 'Atlantis'. Please try a different location."
        );
    }
}
