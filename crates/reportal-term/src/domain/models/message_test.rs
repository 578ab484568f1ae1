use reportal_ui_types::{MetricProps, ReportComponent};
use serde_json::json;

use super::*;

#[test]
fn test_new_text_replaces_tabs() {
    let message = Message::new_text(Author::User, "col1\tcol2");

    assert_eq!(message.author, Author::User);
    assert_eq!(message.message_type, MessageType::Normal);
    match message.content {
        MessageContent::Text(text) => assert_eq!(text, "col1  col2"),
        other => panic!("expected text content, got {other:?}"),
    }
}

#[test]
fn test_new_report_is_authored_by_agent() {
    let component = ReportComponent::Metric(MetricProps {
        title: "Spend".to_string(),
        value: json!("¥120,000"),
        description: None,
        trend: None,
        trend_value: None,
    });
    let message = Message::new_report(vec![component]);

    assert_eq!(message.author, Author::Agent);
    match &message.content {
        MessageContent::Report(components) => assert_eq!(components.len(), 1),
        other => panic!("expected report content, got {other:?}"),
    }
}

#[test]
fn test_messages_get_unique_ids() {
    let first = Message::new_text(Author::User, "a");
    let second = Message::new_text(Author::User, "a");

    assert_ne!(first.id, second.id);
}

#[test]
fn test_time_label_is_hour_minute() {
    let message = Message::new_text(Author::System, "ready");
    let label = message.time_label();

    assert_eq!(label.len(), 5);
    assert_eq!(label.chars().nth(2), Some(':'));
}
