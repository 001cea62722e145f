use rmcp::ErrorData as McpError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Units of measurement
// ============================================================================

/// Measurement system forwarded to the OpenWeather API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin temperatures, metre/sec wind
    Standard,
    /// Celsius temperatures, metre/sec wind
    #[default]
    Metric,
    /// Fahrenheit temperatures, miles/hour wind
    Imperial,
}

impl Units {
    /// Query-parameter value expected by the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Suffix appended to formatted temperature values.
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "\u{00b0}C",
            Units::Imperial => "\u{00b0}F",
        }
    }

    /// Suffix appended to formatted wind speed values.
    pub fn wind_speed_suffix(self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            _ => "m/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CurrentWeatherRequest {
    /// City name (e.g., "London", "New York", "Tokyo")
    pub city: String,
    /// Units of measurement (standard: Kelvin, metric: Celsius, imperial: Fahrenheit); defaults to metric
    pub units: Option<Units>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ForecastRequest {
    /// City name (e.g., "London", "New York", "Tokyo")
    pub city: String,
    /// Number of days for forecast (1-5); defaults to 3
    #[schemars(range(min = 1, max = 5))]
    pub days: Option<u8>,
    /// Units of measurement (standard: Kelvin, metric: Celsius, imperial: Fahrenheit); defaults to metric
    pub units: Option<Units>,
}

/// Validated arguments for the current-weather tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentWeatherArgs {
    pub city: String,
    pub units: Units,
}

/// Validated arguments for the forecast tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastArgs {
    pub city: String,
    pub days: u8,
    pub units: Units,
}

impl ForecastArgs {
    /// Number of 3-hour interval entries to request from the provider.
    pub fn interval_count(&self) -> u32 {
        u32::from(self.days) * crate::constants::FORECAST_ENTRIES_PER_DAY
    }
}

fn invalid_params(tool: &str, reason: &str) -> McpError {
    McpError::invalid_params(format!("Invalid arguments for {}: {}", tool, reason), None)
}

impl CurrentWeatherRequest {
    /// Checks field-level constraints and applies defaults, before any HTTP
    /// activity takes place.
    pub fn validate(self) -> Result<CurrentWeatherArgs, McpError> {
        if self.city.trim().is_empty() {
            return Err(invalid_params(
                "get_current_weather",
                "city must be a non-empty string",
            ));
        }

        Ok(CurrentWeatherArgs {
            city: self.city,
            units: self.units.unwrap_or_default(),
        })
    }
}

impl ForecastRequest {
    pub fn validate(self) -> Result<ForecastArgs, McpError> {
        if self.city.trim().is_empty() {
            return Err(invalid_params(
                "get_weather_forecast",
                "city must be a non-empty string",
            ));
        }

        let days = self.days.unwrap_or(3);
        if !(1..=5).contains(&days) {
            return Err(invalid_params(
                "get_weather_forecast",
                "days must be between 1 and 5",
            ));
        }

        Ok(ForecastArgs {
            city: self.city,
            days,
            units: self.units.unwrap_or_default(),
        })
    }
}

// ============================================================================
// OpenWeather API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub main: Measurements,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    pub clouds: Clouds,
    pub sys: SunInfo,
}

#[derive(Debug, Deserialize)]
pub struct Measurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

#[derive(Debug, Deserialize)]
pub struct SunInfo {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
    pub city: City,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntry {
    pub main: Measurements,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Interval timestamp, "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
}

#[derive(Debug, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

/// Error body the provider attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ProviderError {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn temperature_suffix_per_units() {
        assert_eq!(Units::Standard.temperature_suffix(), "K");
        assert_eq!(Units::Metric.temperature_suffix(), "\u{00b0}C");
        assert_eq!(Units::Imperial.temperature_suffix(), "\u{00b0}F");
    }

    #[test]
    fn wind_speed_suffix_is_mph_only_for_imperial() {
        assert_eq!(Units::Imperial.wind_speed_suffix(), "mph");
        assert_eq!(Units::Metric.wind_speed_suffix(), "m/s");
        assert_eq!(Units::Standard.wind_speed_suffix(), "m/s");
    }

    #[test]
    fn units_deserialize_lowercase_only() {
        assert_eq!(
            serde_json::from_value::<Units>(json!("imperial")).unwrap(),
            Units::Imperial
        );
        assert!(serde_json::from_value::<Units>(json!("kelvin")).is_err());
        assert!(serde_json::from_value::<Units>(json!("Metric")).is_err());
    }

    #[test]
    fn missing_city_fails_deserialization() {
        assert!(serde_json::from_value::<CurrentWeatherRequest>(json!({})).is_err());
        assert!(serde_json::from_value::<ForecastRequest>(json!({ "days": 2 })).is_err());
    }

    #[test]
    fn empty_city_is_rejected() {
        let err = CurrentWeatherRequest {
            city: "  ".into(),
            units: None,
        }
        .validate()
        .unwrap_err();

        assert!(err.message.contains("get_current_weather"));
        assert!(err.message.contains("city"));
    }

    #[test]
    fn omitted_units_default_to_metric() {
        let implicit = CurrentWeatherRequest {
            city: "London".into(),
            units: None,
        }
        .validate()
        .unwrap();

        let explicit = CurrentWeatherRequest {
            city: "London".into(),
            units: Some(Units::Metric),
        }
        .validate()
        .unwrap();

        assert_eq!(implicit, explicit);
    }

    #[test]
    fn forecast_defaults_and_interval_count() {
        let args = ForecastRequest {
            city: "Tokyo".into(),
            days: None,
            units: None,
        }
        .validate()
        .unwrap();

        assert_eq!(args.days, 3);
        assert_eq!(args.units, Units::Metric);
        assert_eq!(args.interval_count(), 24);

        let two_days = ForecastRequest {
            city: "Tokyo".into(),
            days: Some(2),
            units: None,
        }
        .validate()
        .unwrap();

        assert_eq!(two_days.interval_count(), 16);
    }

    #[test]
    fn out_of_range_days_is_rejected() {
        for days in [0u8, 6, 10] {
            let err = ForecastRequest {
                city: "Tokyo".into(),
                days: Some(days),
                units: None,
            }
            .validate()
            .unwrap_err();

            assert!(err.message.contains("days must be between 1 and 5"));
        }
    }
}
