mod action;
mod author;
mod event;
mod message;
mod slash_command;

pub use action::Action;
pub use author::Author;
pub use event::Event;
pub use message::{Message, MessageContent, MessageType};
pub use slash_command::SlashCommand;

pub use reportal_client::{ReportingClient, ReportingClientBox};
