//! Gesture Cortex
//!
//! Main entry point. This application:
//! - Captures frames from the camera (or a synthetic source)
//! - Receives hand landmarks from the detector
//! - Classifies gestures against the active application profile
//! - Executes the resulting commands on the host

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gesture_cortex::actuation::{actuator_from_config, Dispatch, Dispatcher};
use gesture_cortex::{app, Command, Config};
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gesture-cortex")]
#[command(about = "Hand gesture control for the desktop", long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still wins)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gesture pipeline until Ctrl+C
    Run,
    /// Execute one command through the configured actuator and exit
    ///
    /// Uses the wire form, e.g. `move:12,0`, `click`, `swipe:next_window`.
    Exec {
        #[arg(value_name = "COMMAND")]
        command: String,
    },
    /// Print the effective configuration as TOML
    DumpConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Exec { command } => exec(&config, &command),
        Commands::DumpConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn exec(config: &Config, text: &str) -> Result<()> {
    let command: Command = text
        .parse()
        .with_context(|| format!("Invalid command {text:?}"))?;
    let mut dispatcher = Dispatcher::new(actuator_from_config(&config.actuation));

    log::info!("Executing {command}");
    match dispatcher.dispatch(&command) {
        Dispatch::Executed => Ok(()),
        Dispatch::Rejected => anyhow::bail!("Command {command} rejected"),
        Dispatch::Failed => anyhow::bail!("Command {command} failed"),
    }
}

async fn run(config: Config) -> Result<()> {
    log::info!("═══════════════════════════════════════");
    log::info!("  Gesture Cortex");
    log::info!("═══════════════════════════════════════");

    let pipeline = match app::build_pipeline(&config).await {
        Ok(p) => p,
        Err(e) => {
            log::error!("Failed to initialize pipeline: {e:#}");
            log::error!("Make sure you have:");
            log::error!("  - A working camera (with the `vision` feature)");
            log::error!("  - A landmark feed or replay file configured");
            return Err(e);
        }
    };

    log::info!("Show TWO PALMS to activate, TWO 'OK' signs to deactivate");
    log::info!("Press Ctrl+C to exit");
    log::info!("───────────────────────────────────────");

    let stop = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal...");
        let _ = tx.blocking_send(());
    })?;

    let pipeline_stop = Arc::clone(&stop);
    let mut pipeline_task = tokio::task::spawn_blocking(move || pipeline.run(&pipeline_stop));

    let report = tokio::select! {
        finished = &mut pipeline_task => finished?,
        _ = rx.recv() => {
            log::info!("Shutting down pipeline...");
            stop.store(true, Ordering::SeqCst);
            pipeline_task.await?
        }
    }?;

    log::info!(
        "Frames: {} captured, {} classified; commands: {} executed, {} failed, {} dropped",
        report.frames_captured,
        report.classifier.frames,
        report.dispatch.executed,
        report.dispatch.failed,
        report.classifier.commands_dropped
    );
    if report.failed_reconnect_bursts > 0 {
        log::warn!(
            "Capture needed {} unsuccessful reconnect bursts",
            report.failed_reconnect_bursts
        );
    }

    log::info!("Gesture Cortex shutdown complete.");
    Ok(())
}
