use std::io;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::SlashCommand;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;

const INPUT_PLACEHOLDER: &str = "分析したい内容を入力してください...";
const WELCOME_HEADLINE: &str = "BigQueryデータ分析を始めましょう";
const WELCOME_EXAMPLE: &str = "例: 「今月のMeta広告のパフォーマンスを見せて」";
const LOADING_LABEL: &str = "分析中";

fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear - 会話をクリアして新しいセッションを開始します。
- /quit /exit (/q) - 終了します。
- /help (/h) - このヘルプを表示します。

HOTKEYS:
- Up arrow / Down arrow - Scroll.
- CTRL+U / CTRL+D - Page up / page down.
- CTRL+O - Insert a line break at the cursor position.
- CTRL+R - Resubmit your last query to the backend.
- CTRL+C - Press twice to exit.
        "#;

    return text.trim().to_string();
}

/// Tears down the terminal from within a panic hook, where no state can be
/// carried in.
pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        DisableMouseCapture
    )
    .unwrap();
    execute!(io::stdout(), crossterm::cursor::Show).unwrap();
}

fn build_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_block(Block::default().borders(Borders::ALL));
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    return textarea;
}

fn header<'a>(app_state: &AppState<'a>) -> Paragraph<'a> {
    let mut spans = vec![Span::styled(
        "reportal",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(email) = &app_state.user_email {
        spans.push(Span::styled(
            format!("  {email}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    return Paragraph::new(Line::from(spans));
}

fn welcome<'a>() -> Paragraph<'a> {
    return Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            WELCOME_HEADLINE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            WELCOME_EXAMPLE,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "/help でコマンド一覧を表示します。",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
}

fn status_line<'a>(app_state: &AppState<'a>) -> Paragraph<'a> {
    if let Some(error) = &app_state.last_error {
        return Paragraph::new(Line::from(Span::styled(
            format!("{error} (Ctrl+Rで再試行)"),
            Style::default().fg(Color::Red),
        )));
    }

    if app_state.waiting_for_backend {
        let dots = ".".repeat(app_state.tick % 4);
        return Paragraph::new(Line::from(Span::styled(
            format!("{LOADING_LABEL}{dots}"),
            Style::default().fg(Color::Yellow),
        )));
    }

    if app_state.exit_warning {
        return Paragraph::new(Line::from(Span::styled(
            "もう一度 Ctrl+C で終了します",
            Style::default().fg(Color::Yellow),
        )));
    }

    return Paragraph::new(Line::from(Span::styled(
        "Enterで送信 | /help",
        Style::default().fg(Color::DarkGray),
    )));
}

fn draw(frame: &mut Frame, app_state: &mut AppState<'_>, textarea: &TextArea<'_>) {
    let layout = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(frame.area());

    frame.render_widget(header(app_state), layout[0]);

    app_state.set_rect(layout[1]);
    if app_state.messages.is_empty() {
        frame.render_widget(welcome(), layout[1]);
    } else {
        let transcript = Paragraph::new(app_state.bubble_list.lines())
            .scroll((app_state.scroll.position, 0));
        frame.render_widget(transcript, layout[1]);
    }

    frame.render_widget(status_line(app_state), layout[2]);
    frame.render_widget(textarea, layout[3]);
}

/// Apply one event to the session and input box. Returns `true` when the
/// loop should exit.
fn handle_event(
    app_state: &mut AppState<'_>,
    textarea: &mut TextArea<'static>,
    action_tx: &mpsc::UnboundedSender<Action>,
    event: Event,
) -> Result<bool> {
    match event {
        Event::KeyboardCharInput(input) => {
            // Typing is suppressed while a request is in flight; one
            // query at a time.
            if !app_state.waiting_for_backend {
                textarea.input(input);
            }
            app_state.exit_warning = false;
        }
        Event::KeyboardCTRLC => {
            if app_state.exit_warning {
                return Ok(true);
            }
            app_state.exit_warning = true;
        }
        Event::KeyboardCTRLO => {
            textarea.insert_newline();
        }
        Event::KeyboardCTRLR => {
            if let Some(action) = app_state.retry_last_query() {
                action_tx.send(action)?;
            }
        }
        Event::KeyboardEnter => {
            app_state.exit_warning = false;
            let input_str = textarea.lines().join("\n");

            if let Some(command) = SlashCommand::parse(&input_str) {
                *textarea = build_textarea();
                match command {
                    SlashCommand::Quit => return Ok(true),
                    SlashCommand::Clear => app_state.clear_session(),
                    SlashCommand::Help => {
                        app_state.add_message(Message::new_text(Author::System, &help_text()));
                    }
                }
                return Ok(false);
            }

            if let Some(action) = app_state.submit_query(&input_str) {
                action_tx.send(action)?;
                *textarea = build_textarea();
            }
        }
        Event::KeyboardPaste(text) => {
            // Gated the same way as typed input.
            if !app_state.waiting_for_backend {
                textarea.set_yank_text(text.replace('\r', "\n"));
                textarea.paste();
            }
            app_state.exit_warning = false;
        }
        Event::ReportReceived(response) => {
            app_state.handle_report_response(response);
        }
        Event::ReportFailed(user_message) => {
            app_state.handle_report_failure(&user_message);
        }
        Event::UITick => {
            app_state.handle_tick();
        }
        Event::UIScrollDown => {
            app_state.scroll.down();
        }
        Event::UIScrollUp => {
            app_state.scroll.up();
        }
        Event::UIScrollPageDown => {
            app_state.scroll.down_page();
        }
        Event::UIScrollPageUp => {
            app_state.scroll.up_page();
        }
    }

    return Ok(false);
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    props: AppStateProps,
    action_tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(props);
    let mut events_service = EventsService::new(event_rx);
    let mut textarea = build_textarea();

    loop {
        terminal.draw(|frame| draw(frame, &mut app_state, &textarea))?;

        let event = events_service.next().await?;
        if handle_event(&mut app_state, &mut textarea, &action_tx, event)? {
            break;
        }
    }

    return Ok(());
}
