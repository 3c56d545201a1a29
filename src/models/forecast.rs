//! Daily forecast series model and shape validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CitycastError;

/// Number of forecast days consumed by the presenter and the chart
pub const FORECAST_DAYS: usize = 5;

/// Aligned per-day sequences as returned by the forecast endpoint.
/// Index i describes the same calendar day across all four sequences.
/// The provider reports data gaps as nulls, so every element is optional
/// until [`ForecastSeries::leading_days`] has vetted the slice on display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSeries {
    /// ISO calendar dates
    pub dates: Vec<String>,
    /// Daily maximum temperature in °C, `None` where the provider has a gap
    pub temps_max_c: Vec<Option<f64>>,
    /// Daily minimum temperature in °C, `None` where the provider has a gap
    pub temps_min_c: Vec<Option<f64>>,
    /// Daily WMO weather codes, `None` where the provider has a gap
    pub codes: Vec<Option<u8>>,
}

/// One calendar day taken out of an aligned series
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Minimum temperature in °C
    pub temp_min_c: f64,
    /// Maximum temperature in °C
    pub temp_max_c: f64,
    /// WMO weather code
    pub weather_code: u8,
}

impl ForecastSeries {
    /// Create a new series from aligned sequences
    #[must_use]
    pub fn new(
        dates: Vec<String>,
        temps_max_c: Vec<Option<f64>>,
        temps_min_c: Vec<Option<f64>>,
        codes: Vec<Option<u8>>,
    ) -> Self {
        Self {
            dates,
            temps_max_c,
            temps_min_c,
            codes,
        }
    }

    /// Number of days the series describes
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Shape-check the series and return its first [`FORECAST_DAYS`] days.
    ///
    /// Misaligned sequence lengths, fewer than [`FORECAST_DAYS`] entries, an
    /// unparseable date, or a null value inside the displayed window all
    /// produce a malformed-response error instead of an index fault further
    /// down the pipeline.
    pub fn leading_days(&self) -> Result<Vec<ForecastDay>, CitycastError> {
        let n = self.dates.len();
        if self.temps_max_c.len() != n || self.temps_min_c.len() != n || self.codes.len() != n {
            return Err(CitycastError::malformed(format!(
                "misaligned daily sequences: {n} dates, {} max, {} min, {} codes",
                self.temps_max_c.len(),
                self.temps_min_c.len(),
                self.codes.len()
            )));
        }
        if n < FORECAST_DAYS {
            return Err(CitycastError::malformed(format!(
                "expected {FORECAST_DAYS} days, got {n}"
            )));
        }

        let mut days = Vec::with_capacity(FORECAST_DAYS);
        for i in 0..FORECAST_DAYS {
            let date = NaiveDate::parse_from_str(&self.dates[i], "%Y-%m-%d").map_err(|e| {
                CitycastError::malformed(format!("unparseable date {:?}: {e}", self.dates[i]))
            })?;
            let temp_min_c = self.temps_min_c[i].ok_or_else(|| {
                CitycastError::malformed(format!("null temperature_2m_min at index {i}"))
            })?;
            let temp_max_c = self.temps_max_c[i].ok_or_else(|| {
                CitycastError::malformed(format!("null temperature_2m_max at index {i}"))
            })?;
            let weather_code = self.codes[i].ok_or_else(|| {
                CitycastError::malformed(format!("null weathercode at index {i}"))
            })?;
            days.push(ForecastDay {
                date,
                temp_min_c,
                temp_max_c,
                weather_code,
            });
        }
        Ok(days)
    }
}
