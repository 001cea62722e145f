use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::{ICON_URL_BASE, ICON_URL_SUFFIX};
use crate::models::{
    Clouds, Condition, CurrentWeatherResponse, ForecastResponse, Measurements, Units, Wind,
};

// ============================================================================
// Presentation Models
// ============================================================================

/// Display-friendly current-conditions report. Every value is a
/// human-readable string carrying its unit suffix.
#[derive(Debug, Serialize)]
pub struct CurrentWeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: TemperatureBlock,
    pub weather: ConditionBlock,
    pub details: DetailBlock,
    pub sun: SunBlock,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct TemperatureBlock {
    pub current: String,
    pub feels_like: String,
    pub min: String,
    pub max: String,
}

#[derive(Debug, Serialize)]
pub struct ConditionBlock {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Serialize)]
pub struct DetailBlock {
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub cloudiness: String,
}

#[derive(Debug, Serialize)]
pub struct SunBlock {
    pub sunrise: String,
    pub sunset: String,
}

/// Display-friendly forecast report: interval entries grouped by calendar
/// date, in order of first appearance.
#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    pub forecast: Vec<DayForecast>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct DayForecast {
    pub date: String,
    pub forecasts: Vec<ForecastSlot>,
}

#[derive(Debug, Serialize)]
pub struct ForecastSlot {
    pub time: String,
    pub temperature: String,
    pub feels_like: String,
    pub weather: ConditionBlock,
    pub details: DetailBlock,
}

// ============================================================================
// Transformations
// ============================================================================

/// Builds the current-conditions report from a provider response.
pub fn current_weather_report(
    data: CurrentWeatherResponse,
    units: Units,
    generated_at: DateTime<Utc>,
) -> CurrentWeatherReport {
    let temp = units.temperature_suffix();

    CurrentWeatherReport {
        city: data.name,
        country: data.sys.country,
        temperature: TemperatureBlock {
            current: format!("{}{}", data.main.temp, temp),
            feels_like: format!("{}{}", data.main.feels_like, temp),
            min: format!("{}{}", data.main.temp_min, temp),
            max: format!("{}{}", data.main.temp_max, temp),
        },
        weather: condition_block(&data.weather),
        details: detail_block(&data.main, &data.wind, &data.clouds, units),
        sun: SunBlock {
            sunrise: local_time(data.sys.sunrise),
            sunset: local_time(data.sys.sunset),
        },
        timestamp: iso_timestamp(generated_at),
    }
}

/// Builds the forecast report, partitioning interval entries into date
/// groups keyed on the date half of `dt_txt`.
pub fn forecast_report(
    data: ForecastResponse,
    units: Units,
    generated_at: DateTime<Utc>,
) -> ForecastReport {
    let temp = units.temperature_suffix();
    let mut days: Vec<DayForecast> = Vec::new();

    for entry in data.list {
        let (date, time) = split_timestamp(&entry.dt_txt);

        let slot = ForecastSlot {
            time: time.to_string(),
            temperature: format!("{}{}", entry.main.temp, temp),
            feels_like: format!("{}{}", entry.main.feels_like, temp),
            weather: condition_block(&entry.weather),
            details: detail_block(&entry.main, &entry.wind, &entry.clouds, units),
        };

        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.forecasts.push(slot),
            None => days.push(DayForecast {
                date: date.to_string(),
                forecasts: vec![slot],
            }),
        }
    }

    ForecastReport {
        city: data.city.name,
        country: data.city.country,
        forecast: days,
        timestamp: iso_timestamp(generated_at),
    }
}

/// Full icon URL for an OpenWeather icon code.
pub fn icon_url(code: &str) -> String {
    format!("{}{}{}", ICON_URL_BASE, code, ICON_URL_SUFFIX)
}

fn condition_block(conditions: &[Condition]) -> ConditionBlock {
    match conditions.first() {
        Some(condition) => ConditionBlock {
            main: condition.main.clone(),
            description: condition.description.clone(),
            icon: icon_url(&condition.icon),
        },
        None => ConditionBlock {
            main: "Unknown".to_string(),
            description: String::new(),
            icon: String::new(),
        },
    }
}

fn detail_block(main: &Measurements, wind: &Wind, clouds: &Clouds, units: Units) -> DetailBlock {
    DetailBlock {
        humidity: format!("{}%", main.humidity),
        pressure: format!("{} hPa", main.pressure),
        wind_speed: format!("{} {}", wind.speed, units.wind_speed_suffix()),
        wind_direction: format!("{}\u{00b0}", wind.deg),
        cloudiness: format!("{}%", clouds.all),
    }
}

/// Splits a provider timestamp "YYYY-MM-DD HH:MM:SS" into date and time.
fn split_timestamp(dt_txt: &str) -> (&str, &str) {
    dt_txt.split_once(' ').unwrap_or((dt_txt, ""))
}

/// Epoch seconds to a local wall-clock time string.
fn local_time(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
