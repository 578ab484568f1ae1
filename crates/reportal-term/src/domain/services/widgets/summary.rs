use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use reportal_ui_types::SummaryProps;

use super::{display_width, scalar_text, title_line, wrap_text};

/// Render a summary card: title, wrapped free text, and an optional
/// two-column key/value metrics grid.
pub fn render(props: &SummaryProps, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(&props.title)];

    for wrapped in wrap_text(&props.text, width as usize) {
        lines.push(Line::from(Span::raw(wrapped)));
    }

    if let Some(metrics) = &props.metrics {
        if !metrics.is_empty() {
            lines.push(Line::default());
        }

        let entries: Vec<(String, String)> = metrics
            .iter()
            .map(|(key, value)| (key.clone(), scalar_text(value)))
            .collect();
        let left_width = entries
            .iter()
            .map(|(key, value)| display_width(key) + display_width(value) + 2)
            .max()
            .unwrap_or(0);

        for pair in entries.chunks(2) {
            let mut spans = metric_spans(&pair[0]);
            if let Some(second) = pair.get(1) {
                let used = display_width(&pair[0].0) + display_width(&pair[0].1) + 2;
                spans.push(Span::raw(" ".repeat(left_width.saturating_sub(used) + 4)));
                spans.extend(metric_spans(second));
            }
            lines.push(Line::from(spans));
        }
    }

    return lines;
}

fn metric_spans((key, value): &(String, String)) -> Vec<Span<'static>> {
    return vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
}
