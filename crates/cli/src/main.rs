//! MathSoc CLI - operator tools for stored contact responses.
//!
//! # Usage
//!
//! ```bash
//! # List responses, newest first
//! mathsoc responses list
//!
//! # Export to CSV
//! mathsoc responses export
//!
//! # Delete all responses
//! mathsoc responses clear --yes
//! ```
//!
//! Works on the same data directory as the site (`MATHSOC_DATA_DIR`). Do not
//! clear while the site is accepting submissions; the two processes do not
//! coordinate writes.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use mathsoc_site::config::SiteConfig;
use mathsoc_site::storage::FileStorage;
use mathsoc_site::store::ResponseStore;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "mathsoc")]
#[command(author, version, about = "MathSoc site tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored contact responses
    Responses {
        #[command(subcommand)]
        action: ResponsesAction,
    },
}

#[derive(Subcommand)]
enum ResponsesAction {
    /// List stored responses, newest first
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export stored responses as CSV
    Export {
        /// Output file (defaults to <prefix>-contact-responses-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete every stored response
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = SiteConfig::from_env()?;
    let store = ResponseStore::new(Arc::new(FileStorage::new(&config.data_dir)));
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Responses { action } => match action {
            ResponsesAction::List { json } => commands::responses::list(&store, json, &mut out)?,
            ResponsesAction::Export { output } => {
                let today = Utc::now().with_timezone(&config.utc_offset).date_naive();
                let path = commands::responses::export(
                    &store,
                    &config.site_prefix,
                    today,
                    output.as_deref(),
                )?;
                writeln!(out, "Wrote {}", path.display())?;
            }
            ResponsesAction::Clear { yes } => {
                let count = commands::responses::clear(&store, yes)?;
                writeln!(out, "Deleted {count} response(s)")?;
            }
        },
    }
    Ok(())
}
