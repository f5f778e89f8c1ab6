use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::icon::{WeatherIcon, resolve_icon};

/// Number of forecast days requested from the provider.
pub const FORECAST_DAYS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub location: String,
    pub days: u8,
    pub air_quality: bool,
}

impl ForecastRequest {
    /// Dashboard request: fixed horizon, air quality excluded.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self { location: location.into(), days: FORECAST_DAYS, air_quality: false }
    }
}

/// Result of one successful fetch. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    /// Provider icon URL. Not rendered in the terminal.
    pub condition_icon: String,
    pub wind_kph: f64,
    pub humidity_pct: u8,
    pub visibility_km: f64,
    pub pressure_mb: f64,
}

impl CurrentConditions {
    pub fn icon(&self) -> WeatherIcon {
        resolve_icon(&self.condition)
    }

    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature_c)
    }

    pub fn rounded_feels_like(&self) -> i64 {
        round_half_up(self.feels_like_c)
    }

    /// Tiles shown beside the headline temperature, in display order.
    pub fn metrics(&self) -> [Metric; 4] {
        [
            Metric { kind: MetricKind::WindSpeed, value: self.wind_kph.to_string() },
            Metric { kind: MetricKind::Humidity, value: self.humidity_pct.to_string() },
            Metric { kind: MetricKind::Visibility, value: self.visibility_km.to_string() },
            Metric { kind: MetricKind::Pressure, value: self.pressure_mb.to_string() },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub condition: String,
}

impl ForecastDay {
    /// Short weekday, e.g. "Mon".
    pub fn day_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn rounded_max(&self) -> i64 {
        round_half_up(self.max_temp_c)
    }

    pub fn icon(&self) -> WeatherIcon {
        resolve_icon(&self.condition)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    WindSpeed,
    Humidity,
    Visibility,
    Pressure,
}

impl MetricKind {
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::WindSpeed => "Wind Speed",
            MetricKind::Humidity => "Humidity",
            MetricKind::Visibility => "Visibility",
            MetricKind::Pressure => "Pressure",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::WindSpeed => "km/h",
            MetricKind::Humidity => "%",
            MetricKind::Visibility => "km",
            MetricKind::Pressure => "mb",
        }
    }
}

/// A labeled value ready for display. Values are shown as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub kind: MetricKind,
    pub value: String,
}

/// Rounds halves toward positive infinity: 21.5 -> 22, -2.5 -> -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
