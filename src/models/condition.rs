//! WMO weather-code lookup tables

/// Map a WMO weather code to its display glyph.
///
/// The table is fixed; any code outside it falls back to 🌈.
#[must_use]
pub fn weather_glyph(code: u8) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 => "🌦️",
        61 | 63 | 65 => "🌧️",
        71 | 73 => "🌨️",
        75 => "❄️",
        95 | 96 | 99 => "⛈️",
        _ => "🌈",
    }
}

/// Map a WMO weather code to a human-readable description
#[must_use]
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown conditions",
    }
}
