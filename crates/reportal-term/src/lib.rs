//! Terminal chat front-end for the reporting agent backend.
//!
//! This crate renders a conversation with the report generation service in
//! the terminal: the user types a natural-language query, the backend answers
//! with a list of typed component descriptors, and each descriptor is
//! dispatched to a widget (table, metric card, summary, line/bar/pie chart)
//! rendered inline in the transcript. Access is gated by Google sign-in
//! restricted to one corporate email domain.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;

pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Author, Event, Message, MessageContent, MessageType};
pub use domain::services::AppStateProps;
