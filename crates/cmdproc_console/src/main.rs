//! cmdproc-console - interactive console on stdin
//!
//! Reads commands line by line until `quit` or end of input.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cmdproc::CommandProcessor;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::ConsoleConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "console.yaml")]
    config: PathBuf,

    /// Overrides the configured log filter
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ConsoleConfig::load(&args.config)?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.no_color {
        config.processor.color = false;
    }
    logging::init_subscriber(&config.logging, config.processor.color);

    let (quit_tx, mut quit_rx) = mpsc::unbounded_channel();
    let commands = commands::console_commands(quit_tx);
    let signal = CommandProcessor::with_config(commands, config.processor)
        .context("Invalid console command table")?
        .start()
        .context("Failed to start the command processor")?;

    info!(log_type = "console", "Console ready, type 'help' for commands");

    let quit_requested = tokio::select! {
        _ = quit_rx.recv() => true,
        _ = signal.closed() => false,
    };

    if quit_requested {
        signal.shutdown().await;
    }

    info!(log_type = "console", "Console closed");
    Ok(())
}
