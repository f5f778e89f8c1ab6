use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::model::{CurrentConditions, ForecastDay, ForecastRequest, WeatherSnapshot};

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at another host, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    async fn fetch_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let url = format!("{}/forecast.json", self.base_url);
        let aqi = if request.air_quality { "yes" } else { "no" };

        debug!(location = %request.location, days = request.days, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", request.location.as_str()),
                ("days", &request.days.to_string()),
                ("aqi", aqi),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        // An error payload decides the outcome whatever the status code says.
        if let Ok(envelope) = serde_json::from_str::<WaErrorEnvelope>(&body) {
            return Err(ProviderError::Domain {
                code: envelope.error.code,
                message: envelope.error.message,
            });
        }

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: WaForecastResponse = serde_json::from_str(&body)?;

        Ok(parsed.into_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    vis_km: f64,
    pressure_mb: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

impl WaForecastResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let forecast = self
            .forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                max_temp_c: d.day.maxtemp_c,
                condition: d.day.condition.text,
            })
            .collect();

        WeatherSnapshot {
            location_name: self.location.name,
            country: self.location.country,
            last_updated: self.current.last_updated_epoch.and_then(unix_to_utc),
            current: CurrentConditions {
                temperature_c: self.current.temp_c,
                feels_like_c: self.current.feelslike_c,
                condition: self.current.condition.text,
                condition_icon: self.current.condition.icon,
                wind_kph: self.current.wind_kph,
                humidity_pct: self.current.humidity,
                visibility_km: self.current.vis_km,
                pressure_mb: self.current.pressure_mb,
            },
            forecast,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, request: &ForecastRequest) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_forecast(request).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
