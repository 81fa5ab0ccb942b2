use thiserror::Error;

/// Failures of a weather lookup.
///
/// Every variant is terminal for the fetch sequence that produced it; callers
/// surface the message and wait for the next search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// A required configuration value is absent. Raised before any request.
    #[error(
        "Missing configuration: {0}.\n\
         Hint: run `weather configure` or set WEATHER_API_KEY."
    )]
    ConfigMissing(&'static str),

    #[error("Invalid API key. Please check your configuration.")]
    Unauthorized,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("API error: {0}")]
    Upstream(u16),

    /// No response was received at all.
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Unexpected response from weather provider: {0}")]
    InvalidResponse(String),
}

impl WeatherError {
    /// Map a non-success HTTP status to its error kind.
    pub fn from_status(status: u16, city: &str) -> Self {
        match status {
            401 => WeatherError::Unauthorized,
            404 => WeatherError::CityNotFound(city.to_string()),
            other => WeatherError::Upstream(other),
        }
    }

    /// Short stable identifier, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::ConfigMissing(_) => "config_missing",
            WeatherError::Unauthorized => "unauthorized",
            WeatherError::CityNotFound(_) => "city_not_found",
            WeatherError::Upstream(_) => "upstream",
            WeatherError::Network(_) => "network",
            WeatherError::InvalidResponse(_) => "invalid_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_distinct_kinds() {
        let unauthorized = WeatherError::from_status(401, "Oslo");
        let not_found = WeatherError::from_status(404, "Oslo");
        let upstream = WeatherError::from_status(500, "Oslo");

        assert_eq!(unauthorized, WeatherError::Unauthorized);
        assert_eq!(not_found, WeatherError::CityNotFound("Oslo".into()));
        assert_eq!(upstream, WeatherError::Upstream(500));

        let kinds = [unauthorized.kind(), not_found.kind(), upstream.kind()];
        assert_ne!(kinds[0], kinds[1]);
        assert_ne!(kinds[1], kinds[2]);
        assert_ne!(kinds[0], kinds[2]);
    }

    #[test]
    fn other_client_errors_are_upstream() {
        assert_eq!(WeatherError::from_status(429, "x"), WeatherError::Upstream(429));
        assert_eq!(WeatherError::from_status(400, "x"), WeatherError::Upstream(400));
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(WeatherError::CityNotFound("Atlantis".into()).to_string(), "City not found: Atlantis");
        assert_eq!(WeatherError::Upstream(503).to_string(), "API error: 503");
        assert!(WeatherError::ConfigMissing("api_key").to_string().contains("weather configure"));
    }
}
