//! Plain-text rendering of a snapshot for `weather show`.

use std::fmt::Write;

use weather_core::{WeatherSnapshot, model::FORECAST_DAYS};

pub fn render(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let current = &snapshot.current;

    let _ = writeln!(out, "{}, {}", snapshot.location_name, snapshot.country);
    let _ = writeln!(
        out,
        "  {} {}°  {}  (feels like {}°C)",
        current.icon().glyph(),
        current.rounded_temperature(),
        current.condition,
        current.rounded_feels_like(),
    );
    for metric in current.metrics() {
        let (title, unit) = (metric.kind.title(), metric.kind.unit());
        let _ = writeln!(out, "  {title:<12}{} {unit}", metric.value);
    }

    let _ = writeln!(out, "\n{FORECAST_DAYS}-Day Forecast");
    for day in snapshot.forecast.iter().take(usize::from(FORECAST_DAYS)) {
        let temp = format!("{}°", day.rounded_max());
        let _ = writeln!(
            out,
            "  {}  {}  {:>4}  {}",
            day.day_label(),
            day.icon().glyph(),
            temp,
            day.condition,
        );
    }

    out
}
