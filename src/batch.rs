use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::fetch::{Fetcher, LookupError};
use crate::parser::extract::Entry;

/// Batch stats returned after completion.
pub struct BatchStats {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

/// How a single lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Found,
    NotFound,
    Failed,
}

impl Outcome {
    fn of(result: &Result<Vec<Entry>, LookupError>) -> Self {
        match result {
            Ok(_) => Outcome::Found,
            Err(e) if e.is_not_found() => Outcome::NotFound,
            Err(_) => Outcome::Failed,
        }
    }
}

impl BatchStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Found => self.found += 1,
            Outcome::NotFound => self.not_found += 1,
            Outcome::Failed => self.errors += 1,
        }
    }
}

/// One JSON line of batch output.
#[derive(Debug, Serialize)]
pub struct BatchLine {
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Entry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchLine {
    fn new(word: String, outcome: Result<Vec<Entry>, LookupError>) -> Self {
        match outcome {
            Ok(entries) => Self {
                word,
                entries: Some(entries),
                error: None,
            },
            Err(e) if e.is_not_found() => Self {
                word,
                entries: None,
                error: Some("not_found".to_string()),
            },
            Err(e) => Self {
                word,
                entries: None,
                error: Some(format!("{:#}", anyhow::Error::from(e))),
            },
        }
    }
}

/// Look words up concurrently, writing one JSON line per word to `out` as
/// results arrive (completion order, not input order).
pub async fn lookup_all<W: Write>(
    fetcher: Arc<Fetcher>,
    words: Vec<String>,
    concurrency: usize,
    out: &mut W,
) -> Result<BatchStats> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let total = words.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    // Channel: workers send results, main loop writes them out
    let (tx, mut rx) =
        tokio::sync::mpsc::channel::<(Outcome, BatchLine)>(concurrency.max(1) * 2);

    for word in words {
        let fetcher = Arc::clone(&fetcher);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let result = fetcher.lookup(&word).await;
            let outcome = Outcome::of(&result);
            if let (Outcome::Failed, Err(e)) = (outcome, &result) {
                warn!("Lookup failed for {}: {}", word, e);
            }
            let _ = tx.send((outcome, BatchLine::new(word, result))).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut stats = BatchStats {
        total,
        found: 0,
        not_found: 0,
        errors: 0,
    };

    while let Some((outcome, line)) = rx.recv().await {
        stats.record(outcome);
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Looked up {} words ({} found, {} not found, {} errors)",
        stats.total, stats.found, stats.not_found, stats.errors
    );

    Ok(stats)
}

/// Words from a list file: one per line, blank lines and `#` comments skipped.
pub fn read_words(contents: &str, limit: Option<usize>) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
