//! Command-line interface for medialib.
//!
//! Loads the catalog from the configured file, then either starts the
//! interactive menu or prints a one-shot listing.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig};
use crate::domain::{MediaId, MediaKind};
use crate::library::{self, Catalog};

pub mod menu;
pub mod table;

pub use menu::Menu;

/// medialib - Media rental catalog
#[derive(Parser, Debug)]
#[command(name = "medialib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load file (overrides MEDIALIB_DATA_FILE and the config file)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// List the items in the load file
    List {
        /// Only show one kind of media
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single item
    Show {
        /// Media ID (5 digits)
        id: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Media kind for CLI (maps to MediaKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// E-book
    Ebook,

    /// Music CD
    Cd,

    /// Movie DVD
    Dvd,
}

impl From<KindArg> for MediaKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Ebook => MediaKind::EBook,
            KindArg::Cd => MediaKind::MusicDisc,
            KindArg::Dvd => MediaKind::MovieDisc,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?.clone().with_data_file(self.data_file);

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => {
                let mut catalog = load_catalog(&cfg).await;
                run_shell(&mut catalog, &cfg)
            }
            Commands::List { kind, json } => {
                let catalog = load_catalog(&cfg).await;
                list_items(&catalog, kind, json)
            }
            Commands::Show { id } => {
                let catalog = load_catalog(&cfg).await;
                show_item(&catalog, &id)
            }
            Commands::Config => show_config(&cfg),
        }
    }
}

async fn load_catalog(cfg: &ResolvedConfig) -> Catalog {
    library::load_or_empty(&cfg.data_file).await.catalog
}

/// Run the interactive menu on stdin/stdout
fn run_shell(catalog: &mut Catalog, cfg: &ResolvedConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(catalog, stdin.lock(), stdout.lock(), cfg.display).run()
}

/// Print the catalog, optionally filtered by kind
fn list_items(catalog: &Catalog, kind: Option<KindArg>, json: bool) -> Result<()> {
    let items = match kind {
        Some(k) => catalog.list_by_kind(k.into()),
        None => catalog.list(),
    };

    let mut out = io::stdout().lock();
    if json {
        let rendered = table::to_json(&items).context("Failed to render JSON")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    if items.is_empty() {
        writeln!(out, "Library is empty.")?;
        return Ok(());
    }

    table::write_table(&mut out, &items)?;
    writeln!(out, "\nTotal: {} items", items.len())?;
    Ok(())
}

/// Print one item by ID
fn show_item(catalog: &Catalog, id: &str) -> Result<()> {
    let id: MediaId = id.parse()?;

    let mut out = io::stdout().lock();
    table::write_header(&mut out)?;
    match catalog.find(&id) {
        Some(item) => table::write_row(&mut out, item)?,
        None => writeln!(out, "Media not found.")?,
    }
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Data file:   {}", cfg.data_file.display());
    println!();
    println!("Display:");
    println!("  On start: {}", cfg.display.on_start);
    println!("  On exit:  {}", cfg.display.on_exit);
    Ok(())
}
