mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use campus_api::ApiClient;
use campus_core::{Session, SessionStorage};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Completions need no server or session.
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "campus", &mut std::io::stdout());
        return Ok(());
    }

    let session = build_session(&cli.global)?;
    // Hydrate from storage; a stored token also kicks off a background
    // role refresh the guard can await.
    session.restore()?;

    let ctx = commands::Ctx::new(session, &cli.global);
    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &ctx).await
}

/// Wire the config, transport, client, and persistent store into a session.
fn build_session(global: &cli::GlobalOpts) -> Result<Session, CliError> {
    let cfg = config::load_config()?;
    let base_url = config::api_base_url(global, &cfg)?;
    let transport = config::transport_config(global, &cfg);

    let client = Arc::new(ApiClient::new(base_url, &transport)?);
    let storage = session_storage()?;
    Ok(Session::new(client, storage))
}

fn session_storage() -> Result<SessionStorage, CliError> {
    // Overridable for tests and containers.
    if let Some(dir) = std::env::var_os("CAMPUS_SESSION_DIR") {
        return Ok(SessionStorage::new(std::path::PathBuf::from(dir)));
    }
    SessionStorage::open_default().map_err(CliError::from)
}
