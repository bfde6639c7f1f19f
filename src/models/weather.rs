use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::crop::County;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRain {
    pub date: NaiveDate,
    pub rain_mm: f64,
}

/// Observed and forecast conditions for one county, as returned by the
/// Open-Meteo datasource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub county: County,
    pub fetched_at: DateTime<Utc>,
    pub current_temp_c: f64,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    /// Total rainfall over the trailing 7 days, mm.
    pub rainfall_7d_mm: f64,
    /// Total rainfall over the trailing 30 days, mm.
    pub rainfall_30d_mm: f64,
    pub humidity_percent: f64,
    /// WMO weather interpretation code.
    pub weather_code: u32,
    pub daily_rainfall: Vec<DailyRain>,
}

impl WeatherReport {
    /// Annual rainfall estimate extrapolated from the trailing 30 days,
    /// used to pre-fill the planner's expected-rainfall field.
    pub fn annualized_rainfall_mm(&self) -> f64 {
        (self.rainfall_30d_mm * 12.0).round()
    }

    pub fn description(&self) -> &'static str {
        weather_description(self.weather_code)
    }
}

/// Human label for a WMO weather code.
pub fn weather_description(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        4..=48 => "Foggy",
        49..=57 => "Drizzle",
        58..=67 => "Rain",
        68..=77 => "Snow",
        78..=82 => "Rain showers",
        83..=86 => "Snow showers",
        _ => "Thunderstorm",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            county: County::Nakuru,
            fetched_at: Utc::now(),
            current_temp_c: 21.4,
            max_temp_c: 25.0,
            min_temp_c: 12.3,
            rainfall_7d_mm: 18.2,
            rainfall_30d_mm: 66.7,
            humidity_percent: 72.0,
            weather_code: 2,
            daily_rainfall: Vec::new(),
        }
    }

    #[test]
    fn annualized_rainfall_rounds_to_whole_mm() {
        let report = sample_report();
        assert_eq!(report.annualized_rainfall_mm(), 800.0);
    }

    #[test]
    fn weather_description_ranges() {
        assert_eq!(weather_description(0), "Clear sky");
        assert_eq!(weather_description(2), "Partly cloudy");
        assert_eq!(weather_description(45), "Foggy");
        assert_eq!(weather_description(51), "Drizzle");
        assert_eq!(weather_description(63), "Rain");
        assert_eq!(weather_description(71), "Snow");
        assert_eq!(weather_description(80), "Rain showers");
        assert_eq!(weather_description(85), "Snow showers");
        assert_eq!(weather_description(95), "Thunderstorm");
    }
}
