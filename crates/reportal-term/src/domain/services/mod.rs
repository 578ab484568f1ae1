pub mod actions;
mod app_state;
mod bubble_list;
pub mod events;
mod scroll;
pub mod widgets;

pub use actions::ActionsService;
pub use app_state::AppState;
pub use app_state::AppStateProps;
pub use bubble_list::BubbleList;
pub use events::EventsService;
pub use scroll::Scroll;
