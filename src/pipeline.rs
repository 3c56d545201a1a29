//! The forecast pipeline: validate, geocode, fetch, present
//!
//! One invocation per user action. The two network calls run strictly in
//! sequence; the forecast request is only issued once geocoding has produced
//! a location, and any failure short-circuits the rest.

use tracing::{debug, instrument};

use crate::Result;
use crate::api::WeatherApiClient;
use crate::error::CitycastError;
use crate::report::ForecastReport;

/// Trim a raw query, rejecting empty input before any network access
pub fn validate_query(raw_query: &str) -> Result<&str> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Err(CitycastError::EmptyQuery);
    }
    Ok(query)
}

/// Run the whole pipeline for one city query.
///
/// Validates the query, resolves it to a location, fetches the daily
/// forecast, and builds the 5-day report. Zero geocoding results surface as
/// [`CitycastError::CityNotFound`]; drawing the chart from the report is the
/// caller's step, so no failure here ever touches an existing chart.
#[instrument(skip(client))]
pub async fn fetch_city_forecast(
    client: &WeatherApiClient,
    raw_query: &str,
) -> Result<ForecastReport> {
    let query = validate_query(raw_query)?;
    debug!("Running forecast pipeline for {query:?}");

    let location = client
        .geocode(query)
        .await?
        .ok_or(CitycastError::CityNotFound)?;

    let series = client.daily_forecast(&location).await?;

    ForecastReport::new(location, &series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_queries_are_rejected(#[case] raw: &str) {
        let err = validate_query(raw).unwrap_err();
        assert!(matches!(err, CitycastError::EmptyQuery));
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(validate_query("  Paris  ").unwrap(), "Paris");
    }
}
