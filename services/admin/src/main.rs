use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod cli;
mod error;
mod models;
mod notification;
mod services;
mod state;
mod stores;
mod validation;

use common::config::ClientConfig;
use common::token::FileTokenStorage;

use crate::cli::Command;
use crate::notification::Notifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };
    debug!("Parsed command: {:?}", command);

    let config = ClientConfig::from_env()?;
    let token_storage = Arc::new(FileTokenStorage::new(config.token_path.clone()));
    info!("Session token stored at {}", token_storage.path().display());

    let (notifier, mut notifications) = Notifier::channel();
    let printer = tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            cli::render_notification(&notification);
        }
    });

    let app = AppState::new(config, token_storage, notifier)?;
    let outcome = cli::run(&app, command).await;

    // Dropping the stores closes the channel so the printer drains and exits
    drop(app);
    if let Err(e) = printer.await {
        error!("Notification printer failed: {}", e);
    }

    if !outcome? {
        std::process::exit(1);
    }

    Ok(())
}
