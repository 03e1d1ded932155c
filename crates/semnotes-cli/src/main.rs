mod commands;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use commands::NotesDir;
use semnotes_config::Config;
use semnotes_engine::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "semnotes", version, about = "Inspect and normalize semnotes HTML notes")]
struct Cli {
    /// Notes directory; overrides `notes_path` from the config file
    #[arg(long, global = true, value_name = "DIR")]
    notes: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tags, properties and imaginary flag of a note
    Semantics {
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a note in canonical HTML, assigning missing widget ids
    Normalize { file: PathBuf },
    /// List all notes
    List,
    /// List notes matching a search term (`#tag`, `key:value`, text)
    Search { term: String },
    /// List notes whose properties satisfy a query note
    Matches { query: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let dir = resolve_notes_dir(cli.notes)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Semantics { file, json } => commands::semantics(&dir, &file, json, &mut out),
        Command::Normalize { file } => commands::normalize(&dir, &file, &mut out),
        Command::List => commands::list(&dir, &mut out),
        Command::Search { term } => commands::search(&dir, &term, &mut out),
        Command::Matches { query } => commands::matches(&dir, &query, &mut out),
    }
}

/// Notes path from the command line, else from the config file.
fn resolve_notes_dir(cli_notes: Option<PathBuf>) -> Result<NotesDir> {
    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let config = Config::load()
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;

    let (notes_path, source) = match (cli_notes, &config) {
        (Some(path), _) => (path, "command line".to_string()),
        (None, Some(config)) => (
            config.notes_path.clone(),
            format!("config file '{}'", config_path.display()),
        ),
        (None, None) => bail!(
            "No notes path provided and no config file found; pass --notes <DIR> or create {}",
            config_path.display()
        ),
    };
    log::info!("Using notes path {} from {source}", notes_path.display());

    io::validate_notes_dir(&notes_path)
        .with_context(|| format!("Invalid notes directory '{}' from {source}", notes_path.display()))?;

    Ok(NotesDir::new(notes_path, config))
}
