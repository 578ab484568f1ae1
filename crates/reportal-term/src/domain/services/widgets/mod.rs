//! Report widget set: pure functions from validated component props to
//! styled transcript lines.
//!
//! Rendering is best-effort and synchronous. A widget never validates beyond
//! what it destructures; missing fields fall back to the defaults baked into
//! the props types.

mod charts;
mod metric;
mod summary;
mod table;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use reportal_ui_types::{ReportComponent, DEFAULT_PALETTE};
use serde_json::Value;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Resolve one validated descriptor to its widget. Callers iterate a
/// descriptor list in order, so output order always matches input order.
pub fn render(component: &ReportComponent, width: u16) -> Vec<Line<'static>> {
    match component {
        ReportComponent::LineChart(props) => charts::render_line_chart(props, width),
        ReportComponent::BarChart(props) => charts::render_bar_chart(props, width),
        ReportComponent::PieChart(props) => charts::render_pie_chart(props, width),
        ReportComponent::Summary(props) => summary::render(props, width),
        ReportComponent::Metric(props) => metric::render(props),
        ReportComponent::Table(props) => table::render(props, width),
    }
}

pub(crate) fn title_line(title: &str) -> Line<'static> {
    return Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
}

/// A JSON scalar as it appears in a cell or metric value.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "".to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a JSON value. Backends are inconsistent about whether
/// figures arrive as numbers or preformatted strings.
pub(crate) fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn parse_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    return Some(Color::Rgb(red, green, blue));
}

pub(crate) fn palette_color(index: usize) -> Color {
    return parse_color(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]).unwrap_or(Color::Cyan);
}

/// Color for series `index`: its explicit color when present and parseable,
/// the default palette otherwise.
pub(crate) fn series_color(explicit: Option<&str>, index: usize) -> Color {
    return explicit
        .and_then(parse_color)
        .unwrap_or_else(|| palette_color(index));
}

/// Terminal cells occupied by a string. CJK glyphs take two cells, so char
/// counts undershoot by up to half for Japanese text.
pub(crate) fn display_width(text: &str) -> usize {
    return UnicodeWidthStr::width(text);
}

pub(crate) fn glyph_width(ch: char) -> usize {
    return UnicodeWidthChar::width(ch).unwrap_or(0);
}

/// Pad `text` with trailing spaces up to `width` display cells.
pub(crate) fn pad_to_width(text: &str, width: usize) -> String {
    return format!(
        "{text}{}",
        " ".repeat(width.saturating_sub(display_width(text)))
    );
}

/// Display-width line wrapping. Hard-splits long runs, which keeps CJK text
/// without spaces from overflowing the viewport.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;
        for ch in raw_line.chars() {
            let ch_width = glyph_width(ch);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
        lines.push(current);
    }

    return lines;
}
