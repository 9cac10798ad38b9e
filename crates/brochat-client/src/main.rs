//! brochat CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use brochat_client::cli::{Cli, Command, ConfigAction, FeedAction};
use brochat_client::commands;
use brochat_client::config::ClientConfig;
use brochat_client::error::ClientResult;
use brochat_client::BroChatClient;
use brochat_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug_enabled(&config))) {
        eprintln!("warning: {}", e);
    }

    let config_path = cli.config_path();
    let config = config.with_overrides(cli.base_url, cli.token, cli.token_type);
    debug!(path = %config_path.display(), server = ?config.server, "configuration loaded");

    match cli.command {
        Command::Classify { text, channel } => {
            commands::macros::run(&text, channel.as_deref())
        }
        Command::Feed {
            action: FeedAction::Decode,
        } => commands::feed::decode_stdin().await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        command => {
            let client = BroChatClient::from_config(&config)?;
            commands::api::run(&client, command).await
        }
    }
}
