use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::parser::{self, extract::Entry};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("word `{0}` was not found in the dictionary")]
    NotFound(String),
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("cannot build a lookup URL for `{0}`")]
    InvalidWord(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

/// What to do with a response, by status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Hand the body to the parser. The site serves its "no such word" page
    /// with 404, so that status counts too.
    Body,
    Retry,
    Fail,
}

pub fn classify(status: StatusCode) -> StatusAction {
    if status.is_success() || status == StatusCode::NOT_FOUND {
        StatusAction::Body
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusAction::Retry
    } else {
        StatusAction::Fail
    }
}

/// `base * 2^attempt`, clamped instead of overflowing.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Retrieves word pages from the dictionary site and runs them through the
/// parser. Cheap to share behind an `Arc`.
pub struct Fetcher {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff: Duration,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid base_url {:?}", settings.base_url))?;

        Ok(Self {
            client,
            base_url,
            max_retries: settings.max_retries,
            backoff: Duration::from_millis(settings.backoff_ms),
        })
    }

    /// `<base>/<word>` with spaces joined by `+`, the site's own scheme for
    /// multi-word queries.
    pub fn word_url(&self, word: &str) -> Result<Url, LookupError> {
        let query = word.trim();
        if query.is_empty() {
            return Err(LookupError::InvalidWord(word.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidWord(word.to_string()))?
            .pop_if_empty()
            .push(&query.split_whitespace().collect::<Vec<_>>().join("+"));
        Ok(url)
    }

    /// Download the page for `word`, retrying per [`classify`] with
    /// exponential backoff.
    pub async fn fetch_page(&self, word: &str) -> Result<String, LookupError> {
        let url = self.word_url(word)?;
        let mut attempt = 0;

        loop {
            let start = Instant::now();
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|source| LookupError::Fetch {
                    url: url.to_string(),
                    source,
                })?;
            let status = response.status();

            match classify(status) {
                StatusAction::Body => {
                    let body = response.text().await.map_err(|source| LookupError::Fetch {
                        url: url.to_string(),
                        source,
                    })?;
                    info!(
                        "Fetched {} (HTTP {}, {} bytes, {} ms)",
                        url,
                        status.as_u16(),
                        body.len(),
                        start.elapsed().as_millis()
                    );
                    return Ok(body);
                }
                StatusAction::Retry if attempt < self.max_retries => {}
                StatusAction::Retry | StatusAction::Fail => {
                    return Err(LookupError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
            }

            let backoff = backoff_delay(self.backoff, attempt);
            warn!(
                "HTTP {} on {} (attempt {}/{}), backing off {:.1}s",
                status.as_u16(),
                word,
                attempt + 1,
                self.max_retries,
                backoff.as_secs_f64()
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }

    /// Fetch and extract. A "no such word" page and a page without any
    /// usable entry both come back as [`LookupError::NotFound`].
    pub async fn lookup(&self, word: &str) -> Result<Vec<Entry>, LookupError> {
        let html = self.fetch_page(word).await?;
        parser::process_page(&html)
            .into_found()
            .ok_or_else(|| LookupError::NotFound(word.trim().to_string()))
    }
}
