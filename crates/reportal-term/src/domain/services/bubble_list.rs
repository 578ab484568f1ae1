use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use uuid::Uuid;

use super::widgets;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageContent;
use crate::domain::models::MessageType;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

/// Rendered transcript, cached per message. Messages are immutable once
/// appended, so a cache entry only needs rebuilding when the viewport width
/// changes or the message list is replaced underneath it.
#[derive(Default)]
pub struct BubbleList<'a> {
    cache: Vec<(Uuid, Vec<Line<'a>>)>,
    line_count: usize,
    width: u16,
}

impl<'a> BubbleList<'a> {
    pub fn set_messages(&mut self, messages: &[Message], width: usize) {
        let width = width.try_into().unwrap_or(u16::MAX);
        if width != self.width {
            self.cache.clear();
            self.width = width;
        }

        self.cache.truncate(messages.len());
        for (index, message) in messages.iter().enumerate() {
            let cached = self.cache.get(index).is_some_and(|(id, _)| *id == message.id);
            if !cached {
                self.cache.truncate(index);
                self.cache.push((message.id, render_message(message, width)));
            }
        }

        self.line_count = self
            .cache
            .iter()
            .map(|(_, lines)| lines.len() + 1)
            .sum::<usize>()
            .saturating_sub(1);
    }

    /// Total rendered line count, including the blank separators.
    pub fn len(&self) -> usize {
        return self.line_count;
    }

    pub fn is_empty(&self) -> bool {
        return self.line_count == 0;
    }

    pub fn lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line> = vec![];
        for (index, (_, message_lines)) in self.cache.iter().enumerate() {
            if index > 0 {
                lines.push(Line::default());
            }
            lines.extend(message_lines.iter().cloned());
        }

        return lines;
    }
}

fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![header_line(message)];

    match &message.content {
        MessageContent::Text(text) => {
            let style = match message.message_type {
                MessageType::Error => Style::default().fg(Color::Red),
                MessageType::Normal => Style::default(),
            };
            for wrapped in widgets::wrap_text(text, width.saturating_sub(2).max(1).into()) {
                lines.push(Line::from(Span::styled(wrapped, style)));
            }
        }
        MessageContent::Report(components) => {
            for (index, component) in components.iter().enumerate() {
                if index > 0 {
                    lines.push(Line::default());
                }
                lines.extend(widgets::render(component, width));
            }
        }
    }

    return lines;
}

fn header_line(message: &Message) -> Line<'static> {
    let author_color = match message.author {
        Author::User => Color::Cyan,
        Author::Agent => Color::Green,
        Author::System => Color::Yellow,
    };

    return Line::from(vec![
        Span::styled(
            message.author.to_string(),
            Style::default()
                .fg(author_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", message.time_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
}
