//! CLI tool for inspecting the content directory.
//!
//! Loads content files through the same [`ContentStore`] the server uses, so
//! a file that passes `check` here will be served by the API.
//!
//! # Usage
//!
//! ```bash
//! # List content files
//! cargo run --bin content -- list
//!
//! # Validate every catalog entry (or only the given ids)
//! cargo run --bin content -- check
//! cargo run --bin content -- check nicotine alcohol
//!
//! # Print one record
//! cargo run --bin content -- show nicotine
//! ```
//!
//! # Environment Variables
//!
//! - `CONTENT_DIR` (optional): content directory, overridden by `--dir`

use rehab_api::application::services::{CatalogService, ContentLookup, ContentStore};
use rehab_api::infrastructure::storage::FsContentStorage;
use rehab_api::utils::normalize_identifier;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for managing addiction content files.
#[derive(Parser)]
#[command(name = "content")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Content directory (defaults to `CONTENT_DIR` or `content/addictions`)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Print content store diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List identifiers that have a content file
    List,

    /// Load content files and report which are missing or invalid
    Check {
        /// Identifiers to check (all catalog entries when omitted)
        ids: Vec<String>,
    },

    /// Pretty-print a content record as JSON
    Show {
        /// Identifier to show
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("rehab_api=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    let dir = cli
        .dir
        .or_else(|| std::env::var("CONTENT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("content/addictions"));

    let store = ContentStore::new(Arc::new(FsContentStorage::new(&dir)));

    match cli.command {
        Commands::List => list(&store).await,
        Commands::Check { ids } => check(&store, ids).await,
        Commands::Show { id } => show(&store, &id).await,
    }
}

async fn list(store: &ContentStore<FsContentStorage>) -> Result<ExitCode> {
    println!(
        "{} {}",
        "📂 Content files in".bright_blue().bold(),
        store.storage().root().display().to_string().cyan()
    );
    println!();

    let ids = store.list_available_ids().await;

    if ids.is_empty() {
        println!("{}", "  No content files found".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    let catalog = CatalogService::new();
    for id in &ids {
        match catalog.find(id) {
            Some(entry) => println!(
                "  {:<20} {} {}",
                id.cyan(),
                entry.addiction.emoji,
                entry.addiction.name
            ),
            None => println!("  {:<20} {}", id.cyan(), "(not in catalog)".bright_black()),
        }
    }

    println!();
    println!("  Total: {}", ids.len().to_string().bright_white().bold());

    Ok(ExitCode::SUCCESS)
}

/// Loads each id and prints `OK`, `MISSING` or `INVALID`.
///
/// Without ids, every catalog entry is checked and content files that no
/// catalog entry points at are listed as orphans.
async fn check(store: &ContentStore<FsContentStorage>, ids: Vec<String>) -> Result<ExitCode> {
    println!("{}", "🔍 Checking content".bright_blue().bold());
    println!();

    let catalog = CatalogService::new();
    let check_all = ids.is_empty();
    let ids: Vec<String> = if check_all {
        catalog
            .entries()
            .map(|entry| entry.addiction.id.to_string())
            .collect()
    } else {
        ids.iter().map(|id| normalize_identifier(id)).collect()
    };

    let mut failures = 0usize;

    for id in &ids {
        let status = match store.load(id).await {
            ContentLookup::Found(record) => {
                format!("OK  {}", record.title.bright_black()).green()
            }
            ContentLookup::Absent => {
                failures += 1;
                if store.has_resource(id).await {
                    "INVALID".red().bold()
                } else {
                    "MISSING".yellow().bold()
                }
            }
        };

        println!("  {:<20} {}", id.cyan(), status);
    }

    if check_all {
        let known: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
        let orphans: Vec<String> = store
            .list_available_ids()
            .await
            .into_iter()
            .filter(|id| !known.contains(id.as_str()))
            .collect();

        if !orphans.is_empty() {
            println!();
            println!("{}", "  Files without a catalog entry:".yellow());
            for id in &orphans {
                println!("    {}", id.bright_black());
            }
        }
    }

    println!();
    if failures == 0 {
        println!("{}", "✅ All content files are valid".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}",
            format!("❌ {failures} of {} failed", ids.len()).red().bold()
        );
        Ok(ExitCode::FAILURE)
    }
}

async fn show(store: &ContentStore<FsContentStorage>, id: &str) -> Result<ExitCode> {
    let id = normalize_identifier(id);

    let record = store
        .load(&id)
        .await
        .into_option()
        .with_context(|| format!("No valid content for '{id}'"))?;

    let json = serde_json::to_string_pretty(record.as_ref())
        .context("Failed to serialize content record")?;

    println!("{json}");

    Ok(ExitCode::SUCCESS)
}
