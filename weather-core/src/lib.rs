//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its WeatherAPI.com implementation
//! - Shared domain models (requests, snapshots, forecast days)
//! - Icon resolution for condition descriptions
//! - The dashboard controller that owns all view state
//!
//! It is used by `weather-tui`, but can also drive other front ends.

pub mod config;
pub mod dashboard;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::Config;
pub use dashboard::{DashboardController, DashboardEvent, DashboardEvents, DashboardState, Phase};
pub use icon::{WeatherIcon, resolve_icon};
pub use model::{
    CurrentConditions, ForecastDay, ForecastRequest, Metric, MetricKind, WeatherSnapshot,
};
pub use provider::{FailureKind, ProviderError, WeatherProvider, weatherapi::WeatherApiProvider};
