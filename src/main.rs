mod batch;
mod fetch;
mod parser;
mod render;
mod settings;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use fetch::{Fetcher, LookupError};
use parser::extract::Entry;
use settings::Settings;

#[derive(Parser)]
#[command(name = "sjp_lookup", about = "Polish dictionary (sjp.pl) entry lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a word page and print its entries
    Lookup {
        /// Word or phrase to look up
        word: String,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract entries from a saved HTML page (no network)
    Parse {
        /// Path to the HTML file
        path: String,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up every word in a list file, one JSON line per word
    Batch {
        /// File with one word per line
        path: String,
        /// Max words to look up (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Lookup { word, json } => {
            let fetcher = Fetcher::new(&settings)?;
            match fetcher.lookup(&word).await {
                Ok(entries) => print_entries(&entries, json),
                Err(LookupError::NotFound(w)) => {
                    println!("Word `{}` not found in the dictionary.", w);
                    Ok(())
                }
                Err(e) => {
                    Err(anyhow::Error::from(e).context(format!("Lookup of `{}` failed", word)))
                }
            }
        }
        Commands::Parse { path, json } => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            let extraction = parser::process_page(&html);
            info!("Extracted {} entries from {}", extraction.entries().len(), path);
            match extraction.into_found() {
                Some(entries) => print_entries(&entries, json),
                None => {
                    println!("No entries found in {}.", path);
                    Ok(())
                }
            }
        }
        Commands::Batch { path, limit } => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            let words = batch::read_words(&contents, limit);
            if words.is_empty() {
                println!("No words in {}.", path);
                return Ok(());
            }

            let fetcher = Arc::new(Fetcher::new(&settings)?);
            let mut stdout = std::io::stdout().lock();
            let stats =
                batch::lookup_all(fetcher, words, settings.concurrency, &mut stdout).await?;
            eprintln!(
                "Done: {} words ({} found, {} not found, {} errors).",
                stats.total, stats.found, stats.not_found, stats.errors
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn print_entries(entries: &[Entry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        print!("{}", render::entries_text(entries));
    }
    Ok(())
}
