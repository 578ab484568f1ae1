use std::io;
use std::process::exit;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use reportal_term::application::cli;
use reportal_term::destruct_terminal_for_panic;
use reportal_term::domain::services::ActionsService;
use reportal_term::infrastructure::auth::AuthError;
use reportal_term::infrastructure::auth::GoogleAuthGate;
use reportal_term::infrastructure::clients::build_reporting_client;
use reportal_term::start_loop;
use reportal_term::Action;
use reportal_term::AppStateProps;
use reportal_term::Config;
use reportal_term::ConfigKey;
use reportal_term::Event;
use tokio::sync::mpsc;
use yansi::Paint;

#[tokio::main]
async fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let cmd = cli::build();
    let matches = cli::build().get_matches();

    if let Some(("config", config_matches)) = matches.subcommand() {
        if let Some(("default", _)) = config_matches.subcommand() {
            println!("{}", Config::serialize_default(cli::build()));
            return Ok(());
        }
    }

    Config::load(cmd, vec![&matches]).await?;
    let _logging_guard = cli::setup_logging()?;

    let mut user_email = None;
    if Config::get(ConfigKey::NoAuth) != "true" {
        let client_id = Config::get(ConfigKey::GoogleClientID);
        let client_secret = Config::get(ConfigKey::GoogleClientSecret);
        if client_id.is_empty() || client_secret.is_empty() {
            eprintln!(
                "{}",
                Paint::red(
                    "Google OAuth is not configured. Set --google-client-id and --google-client-secret, or pass --no-auth for local development."
                )
            );
            exit(1);
        }

        let redirect_port = Config::get(ConfigKey::RedirectPort).parse::<u16>().unwrap_or(8765);
        let gate = GoogleAuthGate::new(
            &client_id,
            &client_secret,
            &Config::get(ConfigKey::AuthDomain),
            redirect_port,
        );

        match gate.sign_in().await {
            Ok(session) => {
                user_email = Some(session.email);
            }
            Err(AuthError::DomainRejected(email)) => {
                eprintln!(
                    "{}",
                    Paint::red(&format!(
                        "{email} は許可されたドメインのアカウントではありません。"
                    ))
                );
                exit(1);
            }
            Err(err) => {
                eprintln!("{}", Paint::red(&format!("サインインに失敗しました: {err}")));
                exit(1);
            }
        }
    }

    let client = build_reporting_client();
    let mut backend_warning = None;
    if let Err(err) = client.health_check().await {
        backend_warning = Some(format!(
            "バックエンド {} に接続できません。起動しているか確認してください。\n\nError: {err}",
            Config::get(ConfigKey::ApiURL)
        ));
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        if let Err(err) = ActionsService::start(client, event_tx, &mut action_rx).await {
            tracing::error!(error = ?err, "actions service stopped");
        }
    });

    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let props = AppStateProps {
        user_email,
        backend_warning,
    };
    let loop_result = start_loop(&mut terminal, props, action_tx, event_rx).await;

    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return loop_result;
}
