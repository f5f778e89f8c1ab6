//! Mapping from free-text condition descriptions to a small icon set.

use std::fmt;

/// Icon shown next to a forecast day or the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Rain,
    Cloud,
    Snow,
    Drizzle,
    Sun,
}

impl WeatherIcon {
    /// Single-glyph terminal rendering.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Drizzle => "🌦",
            WeatherIcon::Sun => "☀",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Rain => "rain",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Sun => "sun",
        }
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the resolution table: a lowercase needle and the icon it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRule {
    pub needle: &'static str,
    pub icon: WeatherIcon,
}

impl IconRule {
    /// `condition` must already be lowercased.
    fn matches(&self, condition: &str) -> bool {
        condition.contains(self.needle)
    }
}

/// Rules in priority order. The first match wins, so "rain" shadows "drizzle"
/// for strings like "Patchy light drizzle and rain".
pub const ICON_RULES: &[IconRule] = &[
    IconRule { needle: "rain", icon: WeatherIcon::Rain },
    IconRule { needle: "cloud", icon: WeatherIcon::Cloud },
    IconRule { needle: "snow", icon: WeatherIcon::Snow },
    IconRule { needle: "drizzle", icon: WeatherIcon::Drizzle },
];

pub const DEFAULT_ICON: WeatherIcon = WeatherIcon::Sun;

/// Resolve a condition description to an icon. Never fails.
pub fn resolve_icon(condition: &str) -> WeatherIcon {
    let lower = condition.to_lowercase();

    ICON_RULES.iter().find(|rule| rule.matches(&lower)).map_or(DEFAULT_ICON, |rule| rule.icon)
}
