use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use reportal_ui_types::{MetricProps, TrendDirection};

use super::scalar_text;

/// Render a metric card: label, headline value, optional trend line.
pub fn render(props: &MetricProps) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            props.title.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            scalar_text(&props.value),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let mut trailer: Vec<Span> = vec![];
    if let Some(trend) = props.trend {
        let (arrow, color) = trend_glyph(trend);
        trailer.push(Span::styled(
            arrow.to_string(),
            Style::default().fg(color),
        ));
    }
    if let Some(trend_value) = &props.trend_value {
        trailer.push(Span::raw(format!(" {trend_value}")));
    }
    if let Some(description) = &props.description {
        trailer.push(Span::styled(
            format!(" {description}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if !trailer.is_empty() {
        lines.push(Line::from(trailer));
    }

    return lines;
}

/// The three fixed icon/color pairings.
fn trend_glyph(trend: TrendDirection) -> (&'static str, Color) {
    match trend {
        TrendDirection::Up => ("↑", Color::Green),
        TrendDirection::Down => ("↓", Color::Red),
        TrendDirection::Neutral => ("→", Color::DarkGray),
    }
}
