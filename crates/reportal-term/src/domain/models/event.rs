use reportal_ui_types::ReportResponse;
use tui_textarea::Input;

/// Everything the UI loop can wake up on.
#[derive(Debug)]
pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardCTRLO,
    KeyboardCTRLR,
    KeyboardEnter,
    KeyboardPaste(String),
    ReportReceived(ReportResponse),
    ReportFailed(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
