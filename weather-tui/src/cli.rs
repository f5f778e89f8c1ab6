use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, ForecastRequest, WeatherProvider};

use crate::{app::App, logging, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// City to show on startup; defaults to the configured location.
    #[arg(long, short)]
    pub location: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI key and default location.
    Configure,

    /// Print current conditions and the 5-day forecast once.
    Show {
        /// City name; defaults to the configured location.
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => run_dashboard(self.location).await,
            Some(Command::Show { location }) => {
                logging::init_stderr();
                show(location.or(self.location)).await
            }
            Some(Command::Configure) => {
                logging::init_stderr();
                configure()
            }
        }
    }
}

async fn run_dashboard(location: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = config.provider()?;

    let log_path = logging::init_file()?;
    eprintln!("weather log: {}", log_path.display());
    tracing::info!("weather dashboard starting");

    let location = config.startup_location(location);
    App::new(Arc::new(provider), location).run().await
}

async fn show(location: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = config.provider()?;
    let location = config.startup_location(location);

    let snapshot = provider
        .forecast(&ForecastRequest::for_location(location.as_str()))
        .await
        .with_context(|| format!("No weather available for '{location}'"))?;

    print!("{}", report::render(&snapshot));
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let location =
        Text::new("Default location:").with_default(&config.default_location).prompt()?;
    if !location.trim().is_empty() {
        config.default_location = location.trim().to_string();
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
