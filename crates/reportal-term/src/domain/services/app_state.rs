use ratatui::prelude::Rect;
use reportal_ui_types::resolve_components;
use reportal_ui_types::ReportResponse;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub struct AppStateProps {
    pub user_email: Option<String>,
    pub backend_warning: Option<String>,
}

/// The whole conversation state. One query may be in flight at a time; the
/// state machine enforces that itself by refusing submissions while waiting.
pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub exit_warning: bool,
    pub last_error: Option<String>,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub last_query: Option<String>,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub session_id: Option<String>,
    pub tick: usize,
    pub user_email: Option<String>,
    pub waiting_for_backend: bool,
}

impl<'a> AppState<'a> {
    pub fn new(props: AppStateProps) -> AppState<'a> {
        let mut app_state = AppState {
            bubble_list: BubbleList::default(),
            exit_warning: false,
            last_error: None,
            last_known_height: 0,
            last_known_width: 0,
            last_query: None,
            messages: vec![],
            scroll: Scroll::default(),
            session_id: None,
            tick: 0,
            user_email: props.user_email,
            waiting_for_backend: false,
        };

        if let Some(warning) = props.backend_warning {
            app_state.messages.push(Message::new_text_with_type(
                Author::System,
                MessageType::Error,
                &warning,
            ));
        }

        return app_state;
    }

    /// Turn typed input into a backend request. Returns `None` when there is
    /// nothing to send: blank input, or a request already in flight.
    pub fn submit_query(&mut self, input: &str) -> Option<Action> {
        let query = input.trim();
        if query.is_empty() || self.waiting_for_backend {
            return None;
        }

        self.last_error = None;
        self.last_query = Some(query.to_string());
        self.waiting_for_backend = true;
        self.add_message(Message::new_text(Author::User, query));

        return Some(Action::GenerateReport {
            query: query.to_string(),
            session_id: self.session_id.clone(),
        });
    }

    /// Resubmit the previous query, e.g. after a failure.
    pub fn retry_last_query(&mut self) -> Option<Action> {
        if self.waiting_for_backend {
            return None;
        }

        let query = self.last_query.clone()?;
        self.last_error = None;
        self.waiting_for_backend = true;
        self.add_message(Message::new_text(Author::User, &query));

        return Some(Action::GenerateReport {
            query,
            session_id: self.session_id.clone(),
        });
    }

    pub fn handle_report_response(&mut self, response: ReportResponse) {
        // The backend assigns the conversation id on the first response and
        // it sticks for the rest of the session.
        if self.session_id.is_none() {
            self.session_id = Some(response.session_id.clone());
        }

        let components = resolve_components(&response.components);
        self.waiting_for_backend = false;
        self.add_message(Message::new_report(components));
    }

    pub fn handle_report_failure(&mut self, user_message: &str) {
        self.waiting_for_backend = false;
        self.last_error = Some(user_message.to_string());
        self.sync_dependants();
    }

    /// Drop the conversation and the backend session id. The next query
    /// starts a fresh session.
    pub fn clear_session(&mut self) {
        self.messages.clear();
        self.session_id = None;
        self.last_error = None;
        self.last_query = None;
        self.waiting_for_backend = false;
        self.sync_dependants();
    }

    pub fn handle_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width);

        let scrollbar_at_bottom = self.scroll.is_position_at_last();
        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);

        if self.waiting_for_backend && scrollbar_at_bottom {
            self.scroll.last();
        }
    }
}
