//! citycast - city weather lookup with a 5-day temperature chart
//!
//! This library resolves a city name to coordinates via the Open-Meteo
//! geocoding endpoint, fetches a 5-day forecast, renders a textual summary,
//! and draws a two-series min/max temperature line chart.

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use chart::{ChartHandle, draw_temperature_chart};
pub use config::AppConfig;
pub use error::CitycastError;
pub use models::{ForecastDay, ForecastSeries, Location, weather_glyph};
pub use pipeline::fetch_city_forecast;
pub use report::ForecastReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CitycastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
