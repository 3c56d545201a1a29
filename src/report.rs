//! Forecast presentation: markup and plain-text renderings of a 5-day
//! outlook

use crate::error::CitycastError;
use crate::models::{ForecastDay, ForecastSeries, Location, weather_description, weather_glyph};

/// Convert a temperature from Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// A presentable 5-day forecast for a resolved location
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    /// The resolved location
    pub location: Location,
    /// The leading days of the series, exactly [`crate::models::FORECAST_DAYS`]
    days: Vec<ForecastDay>,
}

impl ForecastReport {
    /// Build a report from a location and its forecast series.
    ///
    /// The series is shape-checked; see [`ForecastSeries::leading_days`].
    pub fn new(location: Location, series: &ForecastSeries) -> Result<Self, CitycastError> {
        let days = series.leading_days()?;
        Ok(Self { location, days })
    }

    /// The days on display
    #[must_use]
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    /// Render the markup fragment shown in the output container.
    ///
    /// One header line with the resolved place, then one list entry per day:
    /// date, glyph, min °C/°F, max °C/°F. Fahrenheit is shown with exactly
    /// one decimal, Celsius as reported.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!("<h3>📍 {}</h3><ul>", self.location.display_label());
        for day in &self.days {
            html.push_str(&format!(
                "<li>📅 <strong>{}</strong>: L {} {}°C / {:.1}°F - H {}°C / {:.1}°F</li>",
                day.date,
                weather_glyph(day.weather_code),
                day.temp_min_c,
                celsius_to_fahrenheit(day.temp_min_c),
                day.temp_max_c,
                celsius_to_fahrenheit(day.temp_max_c),
            ));
        }
        html.push_str("</ul>");
        html
    }

    /// Render the terminal summary: same content as the markup fragment,
    /// with the condition description spelled out per day.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!("📍 {}\n", self.location.display_label());
        for day in &self.days {
            text.push_str(&format!(
                "📅 {}: L {} {}°C / {:.1}°F - H {}°C / {:.1}°F ({})\n",
                day.date,
                weather_glyph(day.weather_code),
                day.temp_min_c,
                celsius_to_fahrenheit(day.temp_min_c),
                day.temp_max_c,
                celsius_to_fahrenheit(day.temp_max_c),
                weather_description(day.weather_code),
            ));
        }
        text
    }
}
