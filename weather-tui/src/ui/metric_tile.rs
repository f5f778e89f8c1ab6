//! MetricTile: a bordered box with a title, an icon and a value with its unit.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use weather_core::{Metric, MetricKind};

use crate::theme::{C_TILE_BORDER, style_bold, style_secondary};

/// Height including borders.
pub const METRIC_TILE_HEIGHT: u16 = 4;

pub fn metric_glyph(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::WindSpeed => "🌬",
        MetricKind::Humidity => "💧",
        MetricKind::Visibility => "👁",
        MetricKind::Pressure => "⏲",
    }
}

#[derive(Debug, Clone)]
pub struct MetricTile<'a> {
    title: &'a str,
    value: &'a str,
    unit: &'a str,
    icon: &'a str,
}

impl<'a> MetricTile<'a> {
    pub fn new(title: &'a str, value: &'a str, unit: &'a str, icon: &'a str) -> Self {
        Self { title, value, unit, icon }
    }

    pub fn from_metric(metric: &'a Metric) -> Self {
        Self::new(metric.kind.title(), &metric.value, metric.kind.unit(), metric_glyph(metric.kind))
    }
}

impl Widget for MetricTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(Style::default().fg(C_TILE_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        Paragraph::new(Span::styled(self.title, style_secondary())).render(header, buf);
        Paragraph::new(self.icon).alignment(Alignment::Right).render(header, buf);

        let value = Line::from(vec![
            Span::styled(self.value, style_bold()),
            Span::raw(" "),
            Span::styled(self.unit, style_secondary()),
        ]);
        Paragraph::new(value).render(body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::buffer_lines;

    #[test]
    fn title_above_value_and_unit() {
        let area = Rect::new(0, 0, 20, METRIC_TILE_HEIGHT);
        let mut buf = Buffer::empty(area);
        MetricTile::new("Humidity", "82", "%", "*").render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[1].starts_with("│Humidity"));
        assert!(lines[1].trim_end().ends_with("*│"));
        assert!(lines[2].starts_with("│82 %"));
    }

    #[test]
    fn builds_from_metric() {
        let metric = Metric { kind: MetricKind::Pressure, value: "1012".into() };
        let area = Rect::new(0, 0, 20, METRIC_TILE_HEIGHT);
        let mut buf = Buffer::empty(area);
        MetricTile::from_metric(&metric).render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[1].contains("Pressure"));
        assert!(lines[2].contains("1012 mb"));
    }
}
