use reportal_ui_types::ReportComponent;
use serde_json::json;

use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;

fn metric_component(title: &str, value: &str) -> ReportComponent {
    return serde_json::from_value(json!({
        "type": "Metric",
        "props": {"title": title, "value": value}
    }))
    .unwrap();
}

#[test]
fn test_text_message_renders_header_and_body() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(&[Message::new_text(Author::User, "今月の広告費は?")], 80);

    let lines = bubble_list.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].to_string().starts_with("User"));
    assert_eq!(lines[1].to_string(), "今月の広告費は?");
}

#[test]
fn test_report_message_renders_each_component() {
    let components = vec![
        metric_component("Spend", "¥120,000"),
        metric_component("CPA", "¥1,200"),
    ];

    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(&[Message::new_report(components)], 80);

    let rendered: Vec<String> = bubble_list
        .lines()
        .iter()
        .map(|line| line.to_string())
        .collect();

    // header, two 2-line metric cards, one blank separator between them
    assert_eq!(rendered.len(), 6);
    assert_eq!(rendered[1], "Spend");
    assert_eq!(rendered[4], "CPA");
}

#[test]
fn test_empty_report_message_renders_header_only() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(&[Message::new_report(vec![])], 80);

    assert_eq!(bubble_list.lines().len(), 1);
}

#[test]
fn test_len_counts_separators_between_messages() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(
        &[
            Message::new_text(Author::User, "one"),
            Message::new_text(Author::Agent, "two"),
        ],
        80,
    );

    // two 2-line messages plus one separator
    assert_eq!(bubble_list.len(), 5);
    assert_eq!(bubble_list.lines().len(), 5);
}

#[test]
fn test_width_change_rewraps_cached_messages() {
    let messages = vec![Message::new_text(Author::Agent, &"a".repeat(100))];

    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(&messages, 120);
    let wide = bubble_list.len();

    bubble_list.set_messages(&messages, 30);
    assert!(bubble_list.len() > wide);
}

#[test]
fn test_replacing_messages_drops_stale_cache_entries() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_messages(
        &[
            Message::new_text(Author::User, "one"),
            Message::new_text(Author::Agent, "two"),
        ],
        80,
    );

    bubble_list.set_messages(&[Message::new_text(Author::User, "fresh")], 80);
    assert_eq!(bubble_list.lines().len(), 2);
    assert!(bubble_list.lines()[1].to_string().contains("fresh"));
}
