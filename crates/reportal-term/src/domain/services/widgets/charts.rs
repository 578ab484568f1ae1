use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use reportal_ui_types::{BarChartProps, LineChartProps, PieChartProps, SeriesSpec};
use serde_json::Map;
use serde_json::Value;

use super::{
    display_width, numeric, pad_to_width, palette_color, parse_color, scalar_text, series_color,
    title_line,
};

const SPARKLINE_RAMP: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const MAX_BAR_WIDTH: usize = 40;

/// Render a line chart as one labeled sparkline per series, scaled to each
/// series' own numeric range, with the x-axis range as a footer.
pub fn render_line_chart(props: &LineChartProps, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(&props.title)];

    let label_width = series_label_width(&props.lines);
    let spark_width = (width as usize)
        .saturating_sub(label_width + 20)
        .clamp(8, 60);

    for (index, series) in props.lines.iter().enumerate() {
        let values: Vec<f64> = props
            .data
            .iter()
            .filter_map(|row| numeric(row.get(&series.data_key)))
            .collect();
        let color = series_color(series.color.as_deref(), index);

        let mut spans = vec![Span::styled(
            format!("{} ", pad_to_width(&series_label(series), label_width)),
            Style::default().fg(color),
        )];
        spans.push(Span::styled(
            sparkline(&values, spark_width),
            Style::default().fg(color),
        ));
        if let (Some(first), Some(last)) = (values.first(), values.last()) {
            spans.push(Span::styled(
                format!(" {} → {}", format_number(*first), format_number(*last)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    if let (Some(first_row), Some(last_row)) = (props.data.first(), props.data.last()) {
        let from = first_row.get(&props.x_axis).map(scalar_text);
        let to = last_row.get(&props.x_axis).map(scalar_text);
        if let (Some(from), Some(to)) = (from, to) {
            lines.push(Line::from(Span::styled(
                format!("{}: {from} 〜 {to}", props.x_axis),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    return lines;
}

/// Render a bar chart as horizontal bars, one line per row and series,
/// scaled to the largest value in the chart.
pub fn render_bar_chart(props: &BarChartProps, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(&props.title)];

    let label_width = props
        .data
        .iter()
        .map(|row| display_width(&label_of(row, &props.x_axis)))
        .max()
        .unwrap_or(0);
    let bar_width = (width as usize)
        .saturating_sub(label_width + 16)
        .clamp(5, MAX_BAR_WIDTH);

    let max_value = props
        .data
        .iter()
        .flat_map(|row| {
            props
                .bars
                .iter()
                .filter_map(|series| numeric(row.get(&series.data_key)))
        })
        .fold(0.0f64, f64::max);

    for row in &props.data {
        let label = label_of(row, &props.x_axis);
        for (index, series) in props.bars.iter().enumerate() {
            let value = numeric(row.get(&series.data_key)).unwrap_or(0.0);
            let color = series_color(series.color.as_deref(), index);

            let mut spans = vec![Span::raw(format!("{} ", pad_to_width(&label, label_width)))];
            if props.bars.len() > 1 {
                spans.push(Span::styled(
                    format!("{} ", series_label(series)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(
                "█".repeat(bar_length(value, max_value, bar_width)),
                Style::default().fg(color),
            ));
            spans.push(Span::raw(format!(" {}", format_number(value))));
            lines.push(Line::from(spans));
        }
    }

    return lines;
}

/// Render a pie chart as a proportional breakdown, one line per slice.
/// Explicit colors are used first; the default 8-color palette is cycled by
/// index otherwise.
pub fn render_pie_chart(props: &PieChartProps, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(&props.title)];

    let total: f64 = props
        .data
        .iter()
        .filter_map(|row| numeric(row.get(&props.data_key)))
        .sum();
    if total <= 0.0 {
        return lines;
    }

    let name_width = props
        .data
        .iter()
        .map(|row| display_width(&label_of(row, &props.name_key)))
        .max()
        .unwrap_or(0);
    let bar_width = (width as usize)
        .saturating_sub(name_width + 12)
        .clamp(5, MAX_BAR_WIDTH);

    for (index, row) in props.data.iter().enumerate() {
        let value = numeric(row.get(&props.data_key)).unwrap_or(0.0);
        let fraction = value / total;
        let color = slice_color(&props.colors, index);

        lines.push(Line::from(vec![
            Span::styled("■ ".to_string(), Style::default().fg(color)),
            Span::raw(format!(
                "{} ",
                pad_to_width(&label_of(row, &props.name_key), name_width)
            )),
            Span::styled(
                "█".repeat(((fraction * bar_width as f64).round() as usize).min(bar_width)),
                Style::default().fg(color),
            ),
            Span::styled(
                format!(" {:.1}%", fraction * 100.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    return lines;
}

fn slice_color(explicit: &[String], index: usize) -> Color {
    if explicit.is_empty() {
        return palette_color(index);
    }

    return explicit
        .get(index % explicit.len())
        .and_then(|raw| parse_color(raw))
        .unwrap_or_else(|| palette_color(index));
}

fn series_label(series: &SeriesSpec) -> String {
    if series.name.is_empty() {
        return series.data_key.clone();
    }

    return series.name.clone();
}

fn series_label_width(series: &[SeriesSpec]) -> usize {
    return series
        .iter()
        .map(|spec| display_width(&series_label(spec)))
        .max()
        .unwrap_or(0);
}

fn label_of(row: &Map<String, Value>, key: &str) -> String {
    return row.get(key).map(scalar_text).unwrap_or_default();
}

fn bar_length(value: f64, max_value: f64, bar_width: usize) -> usize {
    if max_value <= 0.0 || value <= 0.0 {
        return 0;
    }

    return (((value / max_value) * bar_width as f64).round() as usize).clamp(1, bar_width);
}

fn sparkline(values: &[f64], max_width: usize) -> String {
    if values.is_empty() {
        return String::new();
    }

    let stride = values.len().div_ceil(max_width.max(1));
    let sampled: Vec<f64> = values.iter().step_by(stride.max(1)).copied().collect();

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    return sampled
        .iter()
        .map(|value| {
            if span <= f64::EPSILON {
                return SPARKLINE_RAMP[3];
            }
            let bucket = (((value - min) / span) * 7.0).round() as usize;
            SPARKLINE_RAMP[bucket.min(7)]
        })
        .collect();
}

fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        return format!("{}", value as i64);
    }

    return format!("{value:.2}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparkline_scales_to_range() {
        let spark = sparkline(&[0.0, 50.0, 100.0], 10);
        assert_eq!(spark, "▁▅█");
    }

    #[test]
    fn test_sparkline_flat_series() {
        assert_eq!(sparkline(&[5.0, 5.0, 5.0], 10), "▄▄▄");
    }

    #[test]
    fn test_sparkline_downsamples_long_series() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert!(sparkline(&values, 20).chars().count() <= 20);
    }

    #[test]
    fn test_line_chart_renders_one_row_per_series() {
        let props: LineChartProps = serde_json::from_value(json!({
            "data": [
                {"date": "2025-01-01", "spend": 100, "clicks": 40},
                {"date": "2025-01-02", "spend": 150, "clicks": 60}
            ],
            "lines": [
                {"dataKey": "spend", "name": "Spend", "color": "#8884d8"},
                {"dataKey": "clicks", "name": "Clicks", "color": "#82ca9d"}
            ]
        }))
        .unwrap();

        let lines = render_line_chart(&props, 80);
        // title, two series rows, x-axis footer
        assert_eq!(lines.len(), 4);
        assert!(lines[1].to_string().contains("Spend"));
        assert!(lines[3].to_string().contains("2025-01-01 〜 2025-01-02"));
    }

    #[test]
    fn test_empty_line_chart_renders_title_only() {
        let props: LineChartProps =
            serde_json::from_value(json!({"data": [], "lines": []})).unwrap();
        let lines = render_line_chart(&props, 80);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "推移グラフ");
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let props: BarChartProps = serde_json::from_value(json!({
            "data": [
                {"name": "Meta", "spend": 100},
                {"name": "Google", "spend": 50}
            ],
            "bars": [{"dataKey": "spend", "name": "Spend", "color": "#8884d8"}]
        }))
        .unwrap();

        let lines = render_bar_chart(&props, 80);
        assert_eq!(lines.len(), 3);
        let meta_bar = lines[1].to_string().matches('█').count();
        let google_bar = lines[2].to_string().matches('█').count();
        assert_eq!(meta_bar, google_bar * 2);
    }

    #[test]
    fn test_bar_labels_align_on_display_cells() {
        let props: BarChartProps = serde_json::from_value(json!({
            "data": [
                {"name": "メタ広告", "spend": 100},
                {"name": "Google", "spend": 50}
            ],
            "bars": [{"dataKey": "spend"}]
        }))
        .unwrap();

        let lines = render_bar_chart(&props, 80);
        let bar_offset = |row: String| {
            let index = row.find('█').unwrap();
            display_width(&row[..index])
        };

        // Bars start at the same display column for CJK and ASCII labels.
        assert_eq!(
            bar_offset(lines[1].to_string()),
            bar_offset(lines[2].to_string()),
        );
    }

    #[test]
    fn test_pie_chart_percentages() {
        let props: PieChartProps = serde_json::from_value(json!({
            "data": [
                {"name": "Meta", "value": 75},
                {"name": "Google", "value": 25}
            ]
        }))
        .unwrap();

        let lines = render_pie_chart(&props, 80);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].to_string().contains("75.0%"));
        assert!(lines[2].to_string().contains("25.0%"));
    }

    #[test]
    fn test_pie_chart_with_zero_total_renders_title_only() {
        let props: PieChartProps = serde_json::from_value(json!({
            "data": [{"name": "Meta", "value": 0}]
        }))
        .unwrap();

        assert_eq!(render_pie_chart(&props, 80).len(), 1);
    }

    #[test]
    fn test_slice_colors_cycle() {
        // With no explicit colors the palette cycles by index.
        assert_eq!(slice_color(&[], 0), slice_color(&[], 8));

        // Explicit colors cycle over the provided list.
        let colors = vec!["#111111".to_string(), "#222222".to_string()];
        assert_eq!(slice_color(&colors, 0), slice_color(&colors, 2));
        assert_ne!(slice_color(&colors, 0), slice_color(&colors, 1));
    }
}
