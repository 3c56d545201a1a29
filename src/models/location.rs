//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A resolved place, taken from the best geocoding match for a query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name (city or town)
    pub name: String,
    /// Country name; "Unknown" when the geocoder omits it
    pub country: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country,
        }
    }

    /// Format location as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Label used in report headers, e.g. "Paris, France"
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
