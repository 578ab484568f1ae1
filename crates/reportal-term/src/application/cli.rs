use std::fs;
use std::path;

use anyhow::Result;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub fn build() -> Command {
    return Command::new("reportal-term")
        .about("Terminal client for the BigQuery reporting agent.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("REPORTAL_API_URL")
                .num_args(1)
                .help(format!(
                    "The reporting backend base URL. [default: {}]",
                    Config::default(ConfigKey::ApiURL)
                )),
        )
        .arg(
            Arg::new(ConfigKey::AuthDomain.to_string())
                .long(ConfigKey::AuthDomain.to_string())
                .env("REPORTAL_AUTH_DOMAIN")
                .num_args(1)
                .help(format!(
                    "The Google Workspace domain allowed to sign in. [default: {}]",
                    Config::default(ConfigKey::AuthDomain)
                )),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .long(ConfigKey::ConfigFile.to_string())
                .env("REPORTAL_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to the configuration file. [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                )),
        )
        .arg(
            Arg::new(ConfigKey::GoogleClientID.to_string())
                .long(ConfigKey::GoogleClientID.to_string())
                .env("GOOGLE_CLIENT_ID")
                .num_args(1)
                .help("The Google OAuth client id used for sign-in."),
        )
        .arg(
            Arg::new(ConfigKey::GoogleClientSecret.to_string())
                .long(ConfigKey::GoogleClientSecret.to_string())
                .env("GOOGLE_CLIENT_SECRET")
                .num_args(1)
                .help("The Google OAuth client secret used for sign-in."),
        )
        .arg(
            Arg::new(ConfigKey::LogFile.to_string())
                .long(ConfigKey::LogFile.to_string())
                .env("REPORTAL_LOG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to the log file. [default: {}]",
                    Config::default(ConfigKey::LogFile)
                )),
        )
        .arg(
            Arg::new(ConfigKey::NoAuth.to_string())
                .long(ConfigKey::NoAuth.to_string())
                .action(ArgAction::SetTrue)
                .help("Skip the Google sign-in gate. Intended for local development."),
        )
        .arg(
            Arg::new(ConfigKey::RedirectPort.to_string())
                .long(ConfigKey::RedirectPort.to_string())
                .env("REPORTAL_REDIRECT_PORT")
                .num_args(1)
                .help(format!(
                    "Local port for the OAuth redirect listener. [default: {}]",
                    Config::default(ConfigKey::RedirectPort)
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration file helpers.")
                .subcommand(Command::new("default").about("Print the default config file.")),
        );
}

/// Route logs to the configured file. The returned guard must stay alive for
/// the lifetime of the process or buffered lines are lost.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_path = path::PathBuf::from(Config::get(ConfigKey::LogFile));
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let log_file = fs::File::create(&log_path)?;
    let (writer, guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    return Ok(guard);
}
