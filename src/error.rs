//! Error types and handling for the citycast application

use thiserror::Error;

/// Main error type for the citycast application
#[derive(Error, Debug)]
pub enum CitycastError {
    /// The city query was empty after trimming
    #[error("Please enter a valid city name.")]
    EmptyQuery,

    /// Geocoding returned zero results for the query
    #[error("City not found. Please check the spelling.")]
    CityNotFound,

    /// The geocoding endpoint answered with a non-success status
    #[error("Failed to fetch location.")]
    LocationFetch { status: reqwest::StatusCode },

    /// The forecast endpoint answered with a non-success status
    #[error("Failed to fetch weather data.")]
    WeatherFetch { status: reqwest::StatusCode },

    /// The request itself could not complete (DNS, connect, timeout)
    #[error("{source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// A successful response did not have the expected shape
    #[error("Malformed forecast response: {reason}")]
    MalformedResponse { reason: String },

    /// Chart rendering or artifact handling failed
    #[error("Chart rendering failed: {message}")]
    Chart { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CitycastError {
    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a new chart error
    pub fn chart<S: Into<String>>(message: S) -> Self {
        Self::Chart {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the message shown to the user, with the marker the outcome class
    /// carries: validation and not-found outcomes keep their own markers,
    /// every true failure gets the warning prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CitycastError::EmptyQuery => format!("❗ {self}"),
            CitycastError::CityNotFound => format!("❌ {self}"),
            _ => format!("⚠️ Error: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let malformed_err = CitycastError::malformed("daily block missing");
        assert!(matches!(
            malformed_err,
            CitycastError::MalformedResponse { .. }
        ));

        let chart_err = CitycastError::chart("backend failure");
        assert!(matches!(chart_err, CitycastError::Chart { .. }));

        let config_err = CitycastError::config("bad base url");
        assert!(matches!(config_err, CitycastError::Config { .. }));
    }

    #[test]
    fn test_validation_message_keeps_own_marker() {
        assert_eq!(
            CitycastError::EmptyQuery.user_message(),
            "❗ Please enter a valid city name."
        );
    }

    #[test]
    fn test_not_found_is_not_a_warning() {
        assert_eq!(
            CitycastError::CityNotFound.user_message(),
            "❌ City not found. Please check the spelling."
        );
    }

    #[test]
    fn test_fetch_errors_carry_warning_prefix() {
        let geo = CitycastError::LocationFetch {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(geo.user_message(), "⚠️ Error: Failed to fetch location.");

        let weather = CitycastError::WeatherFetch {
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(
            weather.user_message(),
            "⚠️ Error: Failed to fetch weather data."
        );
    }

    #[test]
    fn test_malformed_reason_reaches_the_user() {
        let err = CitycastError::malformed("expected 5 days, got 3");
        assert_eq!(
            err.user_message(),
            "⚠️ Error: Malformed forecast response: expected 5 days, got 3"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CitycastError = io_err.into();
        assert!(matches!(err, CitycastError::Io { .. }));
    }
}
