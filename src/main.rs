use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timer21::config::{Args, CliCommand, Settings};
use timer21::journal::Journal;
use timer21::motivator;
use timer21::terminal::run_terminal;
use timer21::timer::{PRESETS, TimerHandle, TimerLoop};
use timer21::ws::websocket_server::start_websocket_server;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "timer21=debug" } else { "timer21=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_journal(settings: &Settings) -> Option<Journal> {
    let path = settings.log_file.as_ref()?;
    match Journal::open(path) {
        Ok(journal) => Some(journal),
        Err(e) => {
            warn!(path = %path.display(), "session journal disabled: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(CliCommand::Phrase { plain }) => {
            if plain {
                println!("{}", motivator::pick_plain());
            } else {
                println!("{}", motivator::pick_decorated());
            }
            return Ok(());
        }
        Some(CliCommand::Presets) => {
            for preset in PRESETS {
                println!("{}", preset);
            }
            return Ok(());
        }
        None => {}
    }

    let settings = Settings::load(&args)?;
    init_tracing(settings.verbose);

    let chime = settings
        .chime
        .build()
        .context("Failed to set up the alert chime")?;
    let journal = open_journal(&settings);
    if let Some(ref journal) = journal {
        info!("Logging to: {}", journal.path().display());
    }

    info!(
        preset = %settings.preset,
        chime = chime.name(),
        "timer ready"
    );
    let (timer, timer_task) = TimerLoop::spawn(settings.preset, chime, journal);

    if args.daemon {
        run_daemon_mode(&settings, timer).await?;
    } else {
        run_terminal(timer).await?;
    }

    timer_task.abort();
    Ok(())
}

/// Serve the timer over WebSocket until Ctrl+C.
async fn run_daemon_mode(settings: &Settings, timer: TimerHandle) -> Result<()> {
    println!("⏱  Timer21 - Daemon Mode");
    println!("Running WebSocket server on ws://{}", settings.ws_addr);

    tokio::select! {
        served = start_websocket_server(settings.ws_addr, timer) => {
            served.context("WebSocket server stopped")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("shutting down");
        }
    }
    Ok(())
}
