//! Weather API client for Open-Meteo integration
//!
//! This module provides HTTP client functionality for the two Open-Meteo
//! collaborators: the geocoding endpoint (city name to coordinates) and the
//! forecast endpoint (coordinates to daily series). Neither requires an API
//! key.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::EndpointsConfig;
use crate::error::CitycastError;
use crate::models::{ForecastSeries, Location};
use crate::{Result, VERSION};

/// HTTP client for the Open-Meteo geocoding and forecast endpoints
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// Shared HTTP client
    client: Client,
    /// Endpoint configuration
    endpoints: EndpointsConfig,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(endpoints: EndpointsConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(endpoints.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("citycast/{VERSION}"))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client, endpoints })
    }

    /// Resolve a city name to its best-match location.
    ///
    /// Returns `Ok(None)` when the geocoder has no match for the query; zero
    /// results is a valid negative outcome, not an error. The query must
    /// already be trimmed and non-empty.
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Option<Location>> {
        let url = self.geocoding_url(query);
        debug!("Geocoding request URL: {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Geocoding request rejected");
            return Err(CitycastError::LocationFetch { status });
        }

        let body: GeocodingResponse = response.json().await?;
        let location = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Location::from);

        match &location {
            Some(loc) => info!(
                "Resolved {query:?} to {} ({})",
                loc.display_label(),
                loc.format_coordinates()
            ),
            None => info!("No geocoding match for {query:?}"),
        }

        Ok(location)
    }

    /// Fetch the daily forecast series for a resolved location.
    ///
    /// Requests daily maximum temperature, minimum temperature, and weather
    /// code with automatic timezone resolution.
    #[instrument(skip(self, location), fields(name = %location.name))]
    pub async fn daily_forecast(&self, location: &Location) -> Result<ForecastSeries> {
        let url = self.forecast_url(location);
        debug!("Forecast request URL: {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Forecast request rejected");
            return Err(CitycastError::WeatherFetch { status });
        }

        let body: ForecastResponse = response.json().await?;
        let daily = body
            .daily
            .ok_or_else(|| CitycastError::malformed("daily block missing"))?;

        let time = daily
            .time
            .ok_or_else(|| CitycastError::malformed("time missing"))?;
        let temps_max = daily
            .temperature_max
            .ok_or_else(|| CitycastError::malformed("temperature_2m_max missing"))?;
        let temps_min = daily
            .temperature_min
            .ok_or_else(|| CitycastError::malformed("temperature_2m_min missing"))?;
        let codes = daily
            .weather_code
            .ok_or_else(|| CitycastError::malformed("weathercode missing"))?;

        let series = ForecastSeries::new(time, temps_max, temps_min, codes);
        info!("Fetched {} forecast days", series.len());
        Ok(series)
    }

    fn geocoding_url(&self, query: &str) -> String {
        format!(
            "{}/search?name={}&count=1",
            self.endpoints.geocoding_base_url,
            urlencoding::encode(query)
        )
    }

    fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,weathercode&timezone=auto",
            self.endpoints.forecast_base_url, location.latitude, location.longitude
        )
    }
}

/// Open-Meteo response structures
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingHit {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl From<GeocodingHit> for Location {
    fn from(hit: GeocodingHit) -> Self {
        Location {
            latitude: hit.latitude,
            longitude: hit.longitude,
            name: hit.name,
            country: hit.country.unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

// Data gaps arrive as null array elements, hence the inner Options
#[derive(Debug, Deserialize)]
struct DailyData {
    time: Option<Vec<String>>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "weathercode")]
    weather_code: Option<Vec<Option<u8>>>,
}
