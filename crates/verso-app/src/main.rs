use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod commands;
mod controller;
mod events;
mod io;
mod mode_sync;
mod page;
mod profile;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "verso", version, about = "Copy-time translation memory with paste-time replay")]
struct Cli {
    /// Config profile to load
    #[arg(long, default_value = "main")]
    profile: String,

    /// Directory holding entries.json and preferences.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the event loop against the page bridge or the clipboard
    Serve {
        /// Connect to the page bridge instead of watching the clipboard
        #[arg(long)]
        ws: bool,
        #[arg(long)]
        ws_url: Option<String>,
    },
    /// Send every untranslated entry to the translation service
    Translate,
    /// Print stored entries
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete the most recently stored entry
    RemoveLast,
    /// Delete every entry
    Clear,
    /// Switch translation mode
    Mode {
        #[arg(value_enum)]
        action: ModeAction,
    },
    /// Tag the first six entries with their page roles
    Tags {
        #[arg(value_enum)]
        action: Switch,
    },
    /// Print the collection as JSON, or write it to a file
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the collection with a JSON list of entries
    Import { file: PathBuf },
    /// Save the effective config as the selected profile
    InitProfile,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeAction {
    On,
    Off,
    Toggle,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = profile::load_user_profile(&cli.profile)?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Command::Serve { ws, ws_url } = &cli.command {
        config.bridge.listen_to_ws |= *ws;
        if let Some(ws_url) = ws_url {
            config.bridge.ws_url = ws_url.clone();
        }
    }

    if let Command::InitProfile = cli.command {
        let path = profile::save_profile(&cli.profile, &config)?;
        println!("Profile written to {}", path.display());
        return Ok(());
    }

    let state = AppState::new(config).await?;

    match cli.command {
        Command::Serve { .. } => serve(Arc::new(state)).await,
        Command::Translate => commands::translate(&state).await,
        Command::List { search } => commands::list(&state, search.as_deref()).await,
        Command::RemoveLast => commands::remove_last(&state).await,
        Command::Clear => commands::clear(&state).await,
        Command::Mode { action } => {
            let active = match action {
                ModeAction::On => Some(true),
                ModeAction::Off => Some(false),
                ModeAction::Toggle => None,
            };
            commands::set_mode(&state, active).await
        }
        Command::Tags { action } => {
            commands::set_tags(&state, matches!(action, Switch::On)).await
        }
        Command::Export { output } => commands::export(&state, output.as_deref()).await,
        Command::Import { file } => commands::import(&state, &file).await,
        Command::InitProfile => Ok(()),
    }
}

async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}
