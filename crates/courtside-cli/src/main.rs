//! Headless Courtside client.
//!
//! Logs in (or reuses a persisted token), acquires the realtime channel,
//! and runs the conversation runtime as a protocol monitor. All output goes
//! through `tracing`; set `RUST_LOG=courtside=debug` for state dumps.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use courtside_api::{ApiClient, ApiConfig, Credentials};
use courtside_app::Runtime;
use courtside_channel::{ChannelManager, transport::WsConnector};
use courtside_core::SessionStore;
use tracing_subscriber::EnvFilter;

mod driver;
mod system_env;
mod token_file;

use driver::LiveDriver;
use token_file::FileTokenStore;

/// Headless Courtside client for protocol verification.
#[derive(Debug, Parser)]
#[command(name = "courtside", version, about)]
struct Args {
    /// REST service root.
    #[arg(long, default_value = "https://api.courtside.example/api")]
    api_url: String,

    /// Realtime channel endpoint.
    #[arg(long, default_value = "wss://api.courtside.example/socket")]
    channel_url: String,

    /// Login email (required unless a token is already persisted).
    #[arg(long)]
    email: Option<String>,

    /// Login password.
    #[arg(long)]
    password: Option<String>,

    /// Session token file.
    #[arg(long)]
    token_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(%message, "exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), String> {
    let token_path = args.token_file.unwrap_or_else(FileTokenStore::default_path);
    let session = SessionStore::new(FileTokenStore::new(token_path));

    let api = ApiClient::new(ApiConfig::new(args.api_url), session.clone())
        .map_err(|err| err.to_string())?;

    if !session.is_authenticated() {
        match (args.email, args.password) {
            (Some(email), Some(password)) => {
                let auth = api
                    .login(&Credentials { email, password })
                    .await
                    .map_err(|err| format!("login failed: {err}"))?;
                tracing::info!(user = %auth.user.full_name(), "logged in");
            }
            _ => {
                return Err(
                    "no persisted session; provide --email and --password to log in".to_string()
                );
            }
        }
    }

    let manager = ChannelManager::new(WsConnector::new(args.channel_url), session.clone());
    let driver = LiveDriver::new(api, manager);

    match Runtime::new(driver, session).run().await {
        Ok(()) => Ok(()),
        Err(infallible) => match infallible {},
    }
}
