//! castplay - a terminal podcast player
//! Type commands (`help` lists them) to control playback.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use castplay::api::HttpEpisodeSource;
use castplay::app::{App, Message};
use castplay::features::Settings;
use castplay::ui::{TerminalSurface, input};

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "castplay", version, about = "Play podcast episodes from the terminal")]
struct Cli {
    /// Episode to load on startup (URL, path relative to the base URL, or JSON file)
    location: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL relative episode locations are resolved against
    #[arg(long)]
    base_url: Option<String>,

    /// Skip width of the back/forward commands, in seconds
    #[arg(long)]
    skip: Option<f64>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }

    fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {:?}", path))?,
            None => Settings::load(),
        };

        if let Some(base_url) = &self.base_url {
            settings.network.base_url = Some(base_url.clone());
        }
        if let Some(skip) = self.skip {
            settings.playback.skip_seconds = skip;
        }
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing for logging; stdout carries the status line
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.load_settings()?;
    for word in settings.keybindings.conflicts() {
        tracing::warn!("Command word {:?} is bound to more than one action", word);
    }

    if cli.save_config {
        match &cli.config {
            Some(path) => settings.save_to_file(path)?,
            None => settings.save()?,
        }
        tracing::info!("Settings saved");
    }

    let source = HttpEpisodeSource::new(&settings.network)?;
    let mut app = App::new(&settings, Arc::new(source), TerminalSurface::stdout());

    let tx = app.sender();
    if let Some(location) = cli.location {
        let _ = tx.send(Message::LoadEpisode(location));
    }
    input::spawn_stdin_reader(tx).context("Failed to start input reader")?;

    app.run().await;
    Ok(())
}
