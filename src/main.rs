// artic-tui - Art Institute of Chicago collection browser
//
// Browses the public artworks API as an incrementally loaded gallery and
// opens single records in a detail view.
//
// Architecture:
// - API client (reqwest): list pages, fetch records, fetch IIIF images
// - Gallery: page cursor, loader state machine, detail fetch lifecycle
// - TUI (ratatui): grid, detail panel, logs; fetches run as tokio tasks
// - CLI (clap): headless `list` / `show` and config management

mod api;
mod cli;
mod config;
mod gallery;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Config commands run before logging and never touch the network
    if let Some(command) = cli.command.as_ref().filter(|c| c.is_config()) {
        cli::handle_config_command(command);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();
    let run_tui = cli.command.is_none() && config.enable_tui;

    let log_buffer = LogBuffer::new();

    // Logging:
    // - TUI mode: capture to the buffer (stdout belongs to the display)
    // - headless: human-readable lines on stderr (stdout carries output)
    // - optionally also JSON lines to rotating files
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("artic_tui={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must live until exit so buffered file logs flush
    let (file_layer, _file_guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let (tui_layer, stderr_layer) = if run_tui {
        (Some(TuiLogLayer::new(log_buffer.clone())), None)
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        "artic-tui {} (api {}, page size {})",
        config::VERSION,
        config.api.api_url,
        config.gallery.page_size
    );

    match cli.command {
        Some(command) => cli::run_command(command, &config).await,
        None if run_tui => tui::run_tui(log_buffer, config).await,
        None => cli::run_list(&config, 1, config.gallery.page_size, false).await,
    }
}
