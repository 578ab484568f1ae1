#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use reportal_ui_types::ReportComponent;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Author;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

/// Payload of one transcript message: user/system text, or the validated
/// component list of an agent response.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub enum MessageContent {
    Text(String),
    Report(Vec<ReportComponent>),
}

/// One transcript entry. Immutable once created; the transcript only ever
/// appends messages, it never edits them in place.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Message {
    pub id: Uuid,
    pub author: Author,
    pub content: MessageContent,
    pub message_type: MessageType,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new_text(author: Author, text: &str) -> Message {
        return Message {
            id: Uuid::new_v4(),
            author,
            content: MessageContent::Text(text.replace('\t', "  ")),
            message_type: MessageType::Normal,
            timestamp: Local::now(),
        };
    }

    pub fn new_text_with_type(author: Author, message_type: MessageType, text: &str) -> Message {
        return Message {
            id: Uuid::new_v4(),
            author,
            content: MessageContent::Text(text.replace('\t', "  ")),
            message_type,
            timestamp: Local::now(),
        };
    }

    pub fn new_report(components: Vec<ReportComponent>) -> Message {
        return Message {
            id: Uuid::new_v4(),
            author: Author::Agent,
            content: MessageContent::Report(components),
            message_type: MessageType::Normal,
            timestamp: Local::now(),
        };
    }

    /// Timestamp as rendered in the transcript header.
    pub fn time_label(&self) -> String {
        return self.timestamp.format("%H:%M").to_string();
    }
}
