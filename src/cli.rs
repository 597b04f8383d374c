// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - list: print gallery pages without the TUI
// - show <ID>: print one record without the TUI
// - config --show/--reset/--edit/--path: configuration management
//
// With no subcommand the interactive gallery starts (or `list` runs when
// ARTIC_NO_TUI is set).

use crate::api::models::{Artwork, ArtworkId};
use crate::api::ArticClient;
use crate::config::{Config, VERSION};
use crate::gallery::detail::{describe, DetailState};
use crate::gallery::{GalleryLoader, LoadOutcome};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;
use unicode_width::UnicodeWidthStr;

/// Art Institute of Chicago collection browser
#[derive(Parser)]
#[command(name = "artic-tui")]
#[command(version = VERSION)]
#[command(about = "Browse the Art Institute of Chicago collection in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print gallery pages (artworks without an image are skipped)
    List {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Records per page (overrides config)
        #[arg(long)]
        limit: Option<u32>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a single artwork record
    Show {
        /// Artwork id
        id: ArtworkId,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Commands {
    /// Whether this command runs without touching the network
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config subcommand (sync, runs before logging is set up)
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `config` commands. Returns true if a command was handled (exit after).
pub fn handle_config_command(command: &Commands) -> bool {
    let Commands::Config {
        show,
        reset,
        edit,
        path,
    } = command
    else {
        return false;
    };

    if *path {
        handle_config_path();
    } else if *show {
        handle_config_show();
    } else if *reset {
        handle_config_reset();
    } else if *edit {
        handle_config_edit();
    } else {
        println!("Usage: artic-tui config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
    true
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!("# tui = {}", config.enable_tui);

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run `list` or `show`
pub async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List { pages, limit, json } => {
            let page_size = limit.filter(|&n| n > 0).unwrap_or(config.gallery.page_size);
            run_list(config, pages, page_size, json).await
        }
        Commands::Show { id, json } => run_show(config, id, json).await,
        Commands::Config { .. } => Ok(()),
    }
}

/// Headless gallery listing
pub async fn run_list(config: &Config, pages: u32, page_size: u32, json: bool) -> Result<()> {
    let client = ArticClient::new(&config.api)?;
    let mut loader = GalleryLoader::new(page_size);
    let mut filtered = 0;

    for _ in 0..pages.max(1) {
        match loader.load_next_page_from(&client).await {
            LoadOutcome::Appended {
                filtered: skipped,
                exhausted,
                ..
            } => {
                filtered += skipped;
                if exhausted {
                    break;
                }
            }
            LoadOutcome::Failed(message) => {
                // First page failure has nothing to show
                if loader.items().is_empty() {
                    bail!(message);
                }
                eprintln!("Warning: {}", message);
                break;
            }
            LoadOutcome::Skipped => break,
        }
    }

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, loader.items())?;
        writeln!(out)?;
        return Ok(());
    }

    for artwork in loader.items() {
        writeln!(out, "{}", list_row(artwork))?;
    }
    writeln!(
        out,
        "\n{} artworks ({} without an image skipped){}",
        loader.items().len(),
        filtered,
        if loader.state().is_exhausted() {
            ", end of collection"
        } else {
            ""
        }
    )?;
    Ok(())
}

/// Headless single-record view
pub async fn run_show(config: &Config, id: ArtworkId, json: bool) -> Result<()> {
    let client = ArticClient::new(&config.api)?;
    let state = DetailState::from_result(client.get_artwork(id).await);

    match state {
        DetailState::Ready(artwork) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&artwork)?);
            } else {
                let url = artwork
                    .image_ref()
                    .map(|image_id| client.image_url(image_id, config.api.image_width));
                print!("{}", describe(&artwork, url.as_deref()));
            }
            Ok(())
        }
        DetailState::NotFound => bail!("Artwork not found"),
        DetailState::Error(message) => bail!(message),
        DetailState::Loading => Ok(()),
    }
}

/// One table row: id, title and artist padded to display width
fn list_row(artwork: &Artwork) -> String {
    let title = artwork.display_title();
    let pad = 32usize.saturating_sub(title.width());
    format!(
        "{:>8}  {}{}  {}",
        artwork.id,
        title,
        " ".repeat(pad),
        artwork.display_artist()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::parse_from(["artic-tui", "list", "--pages", "3", "--json"]);
        match cli.command {
            Some(Commands::List { pages, limit, json }) => {
                assert_eq!(pages, 3);
                assert_eq!(limit, None);
                assert!(json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from(["artic-tui", "show", "27992"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Show {
                id: 27992,
                json: false
            })
        ));
        assert!(Cli::try_parse_from(["artic-tui", "show", "abc"]).is_err());
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::parse_from(["artic-tui"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_row_aligns_columns() {
        let artwork: Artwork = serde_json::from_value(serde_json::json!({
            "id": 27992,
            "title": "A Sunday on La Grande Jatte",
            "artist_title": "Georges Seurat",
            "image_id": "abc"
        }))
        .unwrap();

        let row = list_row(&artwork);
        assert!(row.starts_with("   27992  A Sunday on La Grande Jatte"));
        assert!(row.ends_with("Georges Seurat"));
    }
}
