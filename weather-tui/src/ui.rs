//! Dashboard layout: header clock, search bar, then either a loading
//! indicator, the weather panels, or nothing.

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use tui_input::Input;
use unicode_width::UnicodeWidthChar;
use weather_core::{DashboardState, Phase, WeatherSnapshot, model::FORECAST_DAYS};

use crate::theme::{
    C_PANEL_BORDER, C_SEARCH_FG, style_bold, style_default, style_muted, style_secondary,
    style_title,
};

pub mod forecast_tile;
pub mod metric_tile;

use forecast_tile::{FORECAST_TILE_HEIGHT, ForecastTile};
use metric_tile::{METRIC_TILE_HEIGHT, MetricTile};

const SEARCH_PLACEHOLDER: &str = "Search for a city...";

/// "Monday, January 15, 2024"
pub fn format_date(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// "9:05:03 AM"
pub fn format_time(now: DateTime<Local>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

pub fn draw(frame: &mut Frame, state: &DashboardState, search: &Input) {
    let [header, search_area, body, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame.buffer_mut(), header, state.clock());
    draw_search(frame, search_area, search);

    match state.phase() {
        Phase::Loading => {
            Paragraph::new(Span::styled("Loading...", style_bold()))
                .alignment(Alignment::Center)
                .render(body, frame.buffer_mut());
        }
        Phase::Loaded => {
            if let Some(snapshot) = state.snapshot() {
                draw_weather(frame.buffer_mut(), body, snapshot);
            }
        }
        Phase::Empty => {}
    }

    Paragraph::new(Span::styled("Enter search · Esc quit", style_muted()))
        .alignment(Alignment::Center)
        .render(footer, frame.buffer_mut());
}

fn draw_header(buf: &mut Buffer, area: Rect, now: DateTime<Local>) {
    let lines = vec![
        Line::from(Span::styled("Weather Dashboard", style_title())),
        Line::from(Span::styled(format_date(now), style_secondary())),
        Line::from(Span::styled(format_time(now), style_bold())),
    ];
    Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
}

fn draw_search(frame: &mut Frame, area: Rect, search: &Input) {
    let block = Block::bordered().border_style(Style::default().fg(C_PANEL_BORDER));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let width = inner.width.saturating_sub(1) as usize;
    let scroll = search.visual_scroll(width);
    let value = search.value();

    let text = if value.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, style_muted())
    } else {
        Span::styled(skip_columns(value, scroll), Style::default().fg(C_SEARCH_FG))
    };
    Paragraph::new(Line::from(text)).render(inner, frame.buffer_mut());

    if inner.width > 0 {
        let offset = search.visual_cursor().saturating_sub(scroll) as u16;
        let x = (inner.x + offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

/// Suffix of `value` left after scrolling `columns` display cells off the left.
/// A wide glyph cut by the edge is dropped whole.
fn skip_columns(value: &str, columns: usize) -> &str {
    let mut skipped = 0;
    for (idx, c) in value.char_indices() {
        if skipped >= columns {
            return &value[idx..];
        }
        skipped += c.width().unwrap_or(0);
    }
    ""
}

fn draw_weather(buf: &mut Buffer, area: Rect, snapshot: &WeatherSnapshot) {
    // borders + name + country + gap + two rows of tiles
    let current_height = 2 + 3 + METRIC_TILE_HEIGHT * 2;
    let [current, forecast] = Layout::vertical([
        Constraint::Length(current_height),
        Constraint::Length(FORECAST_TILE_HEIGHT + 2),
    ])
    .areas(area);

    draw_current(buf, current, snapshot);
    draw_forecast(buf, forecast, snapshot);
}

fn draw_current(buf: &mut Buffer, area: Rect, snapshot: &WeatherSnapshot) {
    let block = Block::bordered().border_style(Style::default().fg(C_PANEL_BORDER));
    let inner = block.inner(area);
    block.render(area, buf);

    let [place, _, details] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
            .areas(inner);

    let place_lines = vec![
        Line::from(vec![Span::raw("📍 "), Span::styled(&snapshot.location_name, style_title())]),
        Line::from(Span::styled(&snapshot.country, style_secondary())),
    ];
    Paragraph::new(place_lines).render(place, buf);

    let [summary, metrics] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(details);

    let current = &snapshot.current;
    let summary_lines = vec![
        Line::from(vec![
            Span::raw(format!("{}  ", current.icon().glyph())),
            Span::styled(format!("{}°", current.rounded_temperature()), style_bold()),
        ]),
        Line::from(Span::styled(&current.condition, style_default())),
        Line::from(Span::styled(
            format!("Feels like {}°C", current.rounded_feels_like()),
            style_secondary(),
        )),
    ];
    Paragraph::new(summary_lines).render(summary, buf);

    let metric_values = current.metrics();
    let rows = Layout::vertical([Constraint::Length(METRIC_TILE_HEIGHT); 2]).split(metrics);
    for (row, pair) in rows.iter().zip(metric_values.chunks(2)) {
        let cells = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(*row);
        for (cell, metric) in cells.iter().zip(pair) {
            MetricTile::from_metric(metric).render(*cell, buf);
        }
    }
}

fn draw_forecast(buf: &mut Buffer, area: Rect, snapshot: &WeatherSnapshot) {
    let block = Block::bordered()
        .border_style(Style::default().fg(C_PANEL_BORDER))
        .title(Span::styled(format!(" {FORECAST_DAYS}-Day Forecast "), style_title()));
    let inner = block.inner(area);
    block.render(area, buf);

    let columns = usize::from(FORECAST_DAYS);
    let ratio = Constraint::Ratio(1, u32::from(FORECAST_DAYS));
    let cells = Layout::horizontal(vec![ratio; columns]).split(inner);

    for (cell, day) in cells.iter().zip(snapshot.forecast.iter().take(columns)) {
        ForecastTile::from_day(day).render(*cell, buf);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use ratatui::{Terminal, backend::TestBackend};
    use weather_core::{CurrentConditions, ForecastDay, ProviderError};

    pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 5, 3).unwrap()
    }

    fn snapshot() -> WeatherSnapshot {
        let days = [
            (21.6, "Moderate rain"),
            (18.2, "Cloudy"),
            (3.0, "Light snow"),
            (9.5, "Drizzle"),
            (25.0, "Sunny"),
        ];
        WeatherSnapshot {
            location_name: "Paris".into(),
            country: "France".into(),
            current: CurrentConditions {
                temperature_c: 19.4,
                feels_like_c: 18.9,
                condition: "Light rain".into(),
                condition_icon: String::new(),
                wind_kph: 11.2,
                humidity_pct: 72,
                visibility_km: 10.0,
                pressure_mb: 1016.0,
            },
            forecast: days
                .iter()
                .enumerate()
                .map(|(i, (max, text))| ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 1, 15 + i as u32).unwrap(),
                    max_temp_c: *max,
                    condition: (*text).to_string(),
                })
                .collect(),
            last_updated: None,
        }
    }

    fn render(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|f| draw(f, state, &Input::default())).unwrap();
        buffer_lines(terminal.backend().buffer()).join("\n")
    }

    #[test]
    fn skip_columns_counts_display_width() {
        assert_eq!(skip_columns("Paris", 0), "Paris");
        assert_eq!(skip_columns("Paris", 2), "ris");
        assert_eq!(skip_columns("Paris", 9), "");
        // Each of these takes two cells.
        assert_eq!(skip_columns("東京都", 2), "京都");
        assert_eq!(skip_columns("東京都", 4), "都");
        assert_eq!(skip_columns("東京都", 3), "都");
        assert_eq!(skip_columns("a東京", 1), "東京");
    }

    #[test]
    fn long_wide_query_keeps_cursor_end_visible() {
        let query = "東京都千代田区丸の内一丁目";
        let search = Input::new(query.to_string());
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_search(f, area, &search);
            })
            .unwrap();

        let lines = buffer_lines(terminal.backend().buffer());
        let row: String = lines[1].chars().filter(|c| !matches!(c, '│' | ' ')).collect();
        assert!(row.ends_with("一丁目"), "unexpected row {row:?}");
        assert!(!row.contains('東'));
        // 18 cells of room: the tail fills it instead of scrolling past it.
        assert!(row.chars().count() >= 8, "unexpected row {row:?}");
    }

    #[test]
    fn clock_formats() {
        assert_eq!(format_date(at()), "Monday, January 15, 2024");
        assert_eq!(format_time(at()), "9:05:03 AM");
    }

    #[test]
    fn loading_replaces_weather_content() {
        let mut state = DashboardState::new("London", at());
        state.dispatch();

        let screen = render(&state);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains("Forecast"));
        assert!(screen.contains("Search for a city..."));
    }

    #[test]
    fn loaded_shows_panel_and_five_tiles_in_order() {
        let mut state = DashboardState::new("Paris", at());
        let dispatch = state.dispatch();
        state.settle(dispatch.id, Ok(snapshot()));

        let screen = render(&state);
        assert!(screen.contains("Paris"));
        assert!(screen.contains("France"));
        assert!(screen.contains("Feels like 19°C"));
        assert!(screen.contains("11.2 km/h"));
        assert!(screen.contains("72 %"));
        assert!(screen.contains("5-Day Forecast"));

        let labels = ["Mon", "Tue", "Wed", "Thu", "Fri"];
        let label_row = screen.lines().find(|l| l.contains("Tue")).unwrap();
        let positions: Vec<_> = labels.iter().map(|l| label_row.find(l).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let temps_row = screen.lines().find(|l| l.contains("22°")).unwrap();
        for temp in ["22°", "18°", "3°", "10°", "25°"] {
            assert!(temps_row.contains(temp), "missing {temp} in {temps_row}");
        }
    }

    #[test]
    fn empty_state_renders_no_weather() {
        let mut state = DashboardState::new("Atlantis", at());
        let dispatch = state.dispatch();
        let failure =
            ProviderError::Domain { code: 1006, message: "No matching location found.".into() };
        state.settle(dispatch.id, Err(failure));

        let screen = render(&state);
        assert!(!screen.contains("Loading..."));
        assert!(!screen.contains("Forecast"));
        assert!(!screen.contains("No matching location"));
        assert!(screen.contains("9:05:03 AM"));
    }
}
