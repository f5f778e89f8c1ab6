//! ForecastTile: one day of the forecast grid.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use weather_core::ForecastDay;

use crate::theme::{C_TILE_BORDER, style_bold, style_secondary};

/// Height including borders.
pub const FORECAST_TILE_HEIGHT: u16 = 7;

#[derive(Debug, Clone)]
pub struct ForecastTile<'a> {
    day: String,
    icon: &'a str,
    temp: i64,
    condition: &'a str,
}

impl<'a> ForecastTile<'a> {
    pub fn new(day: impl Into<String>, icon: &'a str, temp: i64, condition: &'a str) -> Self {
        Self { day: day.into(), icon, temp, condition }
    }

    pub fn from_day(day: &'a ForecastDay) -> Self {
        Self::new(day.day_label(), day.icon().glyph(), day.rounded_max(), &day.condition)
    }
}

impl Widget for ForecastTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::default().fg(C_TILE_BORDER));

        let lines = vec![
            Line::from(Span::styled(self.day, style_secondary())),
            Line::from(self.icon),
            Line::from(Span::styled(format!("{}°", self.temp), style_bold())),
            Line::from(Span::styled(self.condition, style_secondary())),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::buffer_lines;
    use chrono::NaiveDate;

    #[test]
    fn shows_label_rounded_temperature_and_condition() {
        let day = ForecastDay {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            max_temp_c: 21.6,
            condition: "Sunny".into(),
        };

        let area = Rect::new(0, 0, 16, FORECAST_TILE_HEIGHT);
        let mut buf = Buffer::empty(area);
        ForecastTile::from_day(&day).render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[1].contains("Mon"));
        assert!(lines[3].contains("22°"));
        assert!(lines[4].contains("Sunny"));
    }
}
