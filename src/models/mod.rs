//! Data models for the citycast application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Forecast: Aligned daily forecast series and shape validation
//! - Condition: WMO weather-code lookup tables

pub mod condition;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use condition::{weather_description, weather_glyph};
pub use forecast::{FORECAST_DAYS, ForecastDay, ForecastSeries};
pub use location::Location;
