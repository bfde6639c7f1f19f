use crate::error::{FarmWiseError, Result};
use crate::models::{County, DailyRain, WeatherReport};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.open-meteo.com/v1";
/// Trailing window used to annualize rainfall.
const PAST_DAYS: u32 = 30;
const FORECAST_DAYS: u32 = 7;

/// Open-Meteo forecast client. Free tier, no API key.
pub struct OpenMeteoClient {
    client: reqwest::Client,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    current: Option<OmCurrent>,
    #[serde(default)]
    daily: Option<OmDaily>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(default)]
    temperature_2m: f64,
    #[serde(default)]
    relative_humidity_2m: f64,
    #[serde(default)]
    weather_code: u32,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

/// Representative coordinates for each supported county.
pub fn county_coords(county: County) -> (f64, f64) {
    match county {
        County::Nakuru => (-0.3031, 36.0800),
        County::UasinGishu => (0.5143, 35.2698),
        County::TransNzoia => (1.0567, 34.9507),
        County::Nyandarua => (-0.1804, 36.5230),
        County::Kiambu => (-1.1714, 36.8356),
        County::Meru => (0.0480, 37.6559),
        County::Nyeri => (-0.4197, 36.9510),
        County::Kirinyaga => (-0.4989, 37.2803),
        County::Machakos => (-1.5177, 37.2634),
        County::Bungoma => (0.5635, 34.5607),
        County::Kakamega => (0.2827, 34.7519),
        County::Kisii => (-0.6698, 34.7675),
        County::Narok => (-1.0876, 35.8600),
        County::Laikipia => (0.3606, 36.7819),
        County::Embu => (-0.5389, 37.4596),
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch current conditions plus 30 trailing and 7 forecast days of
    /// daily aggregates for a county.
    pub async fn fetch_weather(&self, county: County) -> Result<WeatherReport> {
        let (lat, lon) = county_coords(county);
        let url = format!(
            "{}/forecast?latitude={}&longitude={}\
             &current=temperature_2m,relative_humidity_2m,weather_code\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum\
             &past_days={}&forecast_days={}&timezone=Africa%2FNairobi",
            API_BASE_URL, lat, lon, PAST_DAYS, FORECAST_DAYS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FarmWiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmWiseError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            FarmWiseError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        Ok(convert_response(county, om_response))
    }

    /// Probe the API with a minimal request.
    pub async fn test_connection(&self) -> Result<bool> {
        let (lat, lon) = county_coords(County::Nakuru);
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m",
            API_BASE_URL, lat, lon
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FarmWiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_response(county: County, response: OmForecastResponse) -> WeatherReport {
    let current = response.current.unwrap_or(OmCurrent {
        temperature_2m: 0.0,
        relative_humidity_2m: 0.0,
        weather_code: 0,
    });

    let daily = response.daily;
    let rain: Vec<f64> = daily
        .as_ref()
        .map(|d| {
            d.precipitation_sum
                .iter()
                .map(|p| p.unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default();

    let rainfall_30d: f64 = rain.iter().take(PAST_DAYS as usize).sum();
    let rainfall_7d: f64 = rain
        .iter()
        .rev()
        .take(FORECAST_DAYS as usize)
        .sum();

    let daily_rainfall: Vec<DailyRain> = daily
        .as_ref()
        .map(|d| {
            d.time
                .iter()
                .zip(rain.iter())
                .filter_map(|(time, rain_mm)| {
                    NaiveDate::parse_from_str(time, "%Y-%m-%d")
                        .ok()
                        .map(|date| DailyRain {
                            date,
                            rain_mm: *rain_mm,
                        })
                })
                .collect()
        })
        .unwrap_or_default();

    let last_value = |values: Option<&Vec<Option<f64>>>| {
        values
            .and_then(|v| v.last().copied())
            .flatten()
            .unwrap_or(0.0)
    };

    WeatherReport {
        county,
        fetched_at: Utc::now(),
        current_temp_c: current.temperature_2m,
        max_temp_c: last_value(daily.as_ref().map(|d| &d.temperature_2m_max)),
        min_temp_c: last_value(daily.as_ref().map(|d| &d.temperature_2m_min)),
        rainfall_7d_mm: round_tenth(rainfall_7d),
        rainfall_30d_mm: round_tenth(rainfall_30d),
        humidity_percent: current.relative_humidity_2m,
        weather_code: current.weather_code,
        daily_rainfall,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_county_has_coordinates_in_kenya() {
        for county in County::ALL {
            let (lat, lon) = county_coords(county);
            assert!((-5.0..=5.0).contains(&lat), "{:?} lat {}", county, lat);
            assert!((33.0..=42.0).contains(&lon), "{:?} lon {}", county, lon);
        }
    }

    #[test]
    fn convert_sums_trailing_and_forecast_rain() {
        // 30 past days of 2mm, then 7 forecast days of 1mm
        let mut precipitation: Vec<Option<f64>> = vec![Some(2.0); 30];
        precipitation.extend(vec![Some(1.0); 7]);
        let time: Vec<String> = (1..=37).map(|i| format!("2026-07-{:02}", (i % 28) + 1)).collect();

        let response = OmForecastResponse {
            current: Some(OmCurrent {
                temperature_2m: 22.5,
                relative_humidity_2m: 64.0,
                weather_code: 3,
            }),
            daily: Some(OmDaily {
                time,
                temperature_2m_max: vec![Some(26.0); 37],
                temperature_2m_min: vec![Some(11.0); 37],
                precipitation_sum: precipitation,
            }),
        };

        let report = convert_response(County::Nakuru, response);
        assert_eq!(report.rainfall_30d_mm, 60.0);
        assert_eq!(report.rainfall_7d_mm, 7.0);
        assert_eq!(report.current_temp_c, 22.5);
        assert_eq!(report.weather_code, 3);
        assert_eq!(report.max_temp_c, 26.0);
        assert_eq!(report.daily_rainfall.len(), 37);
    }

    #[test]
    fn convert_tolerates_missing_sections() {
        let response = OmForecastResponse {
            current: None,
            daily: None,
        };
        let report = convert_response(County::Embu, response);
        assert_eq!(report.rainfall_30d_mm, 0.0);
        assert_eq!(report.rainfall_7d_mm, 0.0);
        assert!(report.daily_rainfall.is_empty());
    }

    #[test]
    fn null_precipitation_counts_as_dry() {
        let response = OmForecastResponse {
            current: None,
            daily: Some(OmDaily {
                time: vec!["2026-08-01".into(), "2026-08-02".into()],
                temperature_2m_max: vec![None, Some(24.0)],
                temperature_2m_min: vec![None, Some(12.0)],
                precipitation_sum: vec![None, Some(4.5)],
            }),
        };
        let report = convert_response(County::Kisii, response);
        assert_eq!(report.rainfall_30d_mm, 4.5);
        assert_eq!(report.daily_rainfall[0].rain_mm, 0.0);
    }
}
