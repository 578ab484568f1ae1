use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use reportal_ui_types::TableProps;

use super::{display_width, glyph_width, scalar_text, title_line};

const COLUMN_GUTTER: usize = 2;

/// Render a data table: title, header row, separator, one line per row.
/// Empty data renders the localized empty state instead.
pub fn render(props: &TableProps, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(&props.title)];

    if props.data.is_empty() {
        lines.push(Line::from(Span::styled(
            "データがありません".to_string(),
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let columns = effective_columns(props);
    if columns.is_empty() {
        return lines;
    }

    let widths = column_widths(props, &columns, width);

    let header = columns
        .iter()
        .zip(widths.iter())
        .map(|(column, column_width)| {
            Span::styled(
                pad_cell(column, *column_width),
                Style::default().add_modifier(Modifier::BOLD),
            )
        })
        .collect::<Vec<Span>>();
    lines.push(Line::from(header));

    let total_width: usize = widths.iter().sum();
    lines.push(Line::from(Span::styled(
        "─".repeat(total_width.min(width as usize)),
        Style::default().fg(Color::DarkGray),
    )));

    for row in &props.data {
        let cells = columns
            .iter()
            .zip(widths.iter())
            .map(|(column, column_width)| {
                let text = row.get(column).map(scalar_text).unwrap_or_default();
                Span::raw(pad_cell(&text, *column_width))
            })
            .collect::<Vec<Span>>();
        lines.push(Line::from(cells));
    }

    return lines;
}

/// Explicit column list, or the first row's keys when it is empty.
fn effective_columns(props: &TableProps) -> Vec<String> {
    if !props.columns.is_empty() {
        return props.columns.clone();
    }

    return props
        .data
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();
}

fn column_widths(props: &TableProps, columns: &[String], width: u16) -> Vec<usize> {
    let cap = (width as usize / columns.len().max(1)).max(6);

    return columns
        .iter()
        .map(|column| {
            let longest_cell = props
                .data
                .iter()
                .map(|row| {
                    row.get(column)
                        .map(|value| display_width(&scalar_text(value)))
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0);
            (longest_cell.max(display_width(column)) + COLUMN_GUTTER).min(cap)
        })
        .collect();
}

/// Truncate and pad a cell to `column_width` display cells. A wide glyph
/// that would straddle the boundary is dropped whole.
fn pad_cell(text: &str, column_width: usize) -> String {
    let visible = column_width.saturating_sub(COLUMN_GUTTER);

    let mut truncated = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = glyph_width(ch);
        if used + ch_width > visible {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }

    return format!("{truncated}{}", " ".repeat(column_width.saturating_sub(used)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props_from(value: serde_json::Value) -> TableProps {
        return serde_json::from_value(value).unwrap();
    }

    #[test]
    fn test_empty_data_renders_empty_state() {
        let props = props_from(json!({"data": [], "columns": ["a"]}));
        let lines = render(&props, 80);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "データテーブル");
        assert_eq!(lines[1].to_string(), "データがありません");
    }

    #[test]
    fn test_columns_fall_back_to_first_row_keys() {
        let props = props_from(json!({
            "data": [{"campaign": "A", "spend": 100}],
            "columns": []
        }));
        let lines = render(&props, 80);

        let header = lines[1].to_string();
        assert!(header.contains("campaign"));
        assert!(header.contains("spend"));
    }

    #[test]
    fn test_rows_follow_column_order() {
        let props = props_from(json!({
            "data": [
                {"campaign": "Meta", "spend": 120000},
                {"campaign": "Google", "spend": 80000}
            ],
            "columns": ["campaign", "spend"],
            "title": "広告費"
        }));
        let lines = render(&props, 80);

        // title, header, separator, two rows
        assert_eq!(lines.len(), 5);
        assert!(lines[3].to_string().starts_with("Meta"));
        assert!(lines[4].to_string().starts_with("Google"));
    }

    #[test]
    fn test_mixed_width_cells_align_on_display_cells() {
        let props = props_from(json!({
            "data": [
                {"campaign": "メタ広告", "spend": 120000},
                {"campaign": "Google", "spend": 80000}
            ],
            "columns": ["campaign", "spend"]
        }));
        let lines = render(&props, 80);

        // The spend column starts at the same display offset in every row
        // even though the labels differ in char count.
        let prefix_width = |row: String, needle: &str| {
            let index = row.find(needle).unwrap();
            display_width(&row[..index])
        };
        assert_eq!(
            prefix_width(lines[3].to_string(), "120000"),
            prefix_width(lines[4].to_string(), "80000"),
        );
    }

    #[test]
    fn test_long_cells_truncate_on_display_cells() {
        let padded = pad_cell("メタ広告キャンペーン", 10);

        assert_eq!(display_width(&padded), 10);
        // Only four glyphs fit in the 8 visible cells.
        assert_eq!(padded.trim_end(), "メタ広告");
    }

    #[test]
    fn test_missing_cells_render_blank() {
        let props = props_from(json!({
            "data": [{"campaign": "Meta"}],
            "columns": ["campaign", "spend"]
        }));
        let lines = render(&props, 80);

        assert!(lines[3].to_string().starts_with("Meta"));
    }
}
