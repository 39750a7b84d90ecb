pub mod extract;
pub mod schema;
pub mod trigger;

use scraper::Html;
use tracing::debug;

use extract::Entry;
use schema::{PageSchema, SjpSchema};

/// Outcome of reading one dictionary page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The page itself says the word doesn't exist.
    NotFound,
    /// Entries in page order. May be empty when no heading produced meanings.
    Entries(Vec<Entry>),
}

impl Extraction {
    pub fn entries(&self) -> &[Entry] {
        match self {
            Extraction::NotFound => &[],
            Extraction::Entries(entries) => entries,
        }
    }

    /// Entries, or `None` when there is nothing to show for the word.
    pub fn into_found(self) -> Option<Vec<Entry>> {
        match self {
            Extraction::Entries(entries) if !entries.is_empty() => Some(entries),
            _ => None,
        }
    }
}

/// Two-stage pipeline: markup → document → entries.
pub fn process_page(html: &str) -> Extraction {
    let doc = Html::parse_document(html);
    extract_document(&SjpSchema, &doc)
}

pub fn extract_document<S: PageSchema + ?Sized>(schema: &S, doc: &Html) -> Extraction {
    if schema.is_not_found(doc) {
        debug!(schema = schema.version(), "not-found marker in heading");
        return Extraction::NotFound;
    }

    let headings = schema.headings(doc);
    let entries: Vec<Entry> = headings
        .iter()
        .filter_map(|&h| extract::extract_entry(schema, doc, h))
        .collect();
    debug!(
        schema = schema.version(),
        headings = headings.len(),
        entries = entries.len(),
        "page extracted"
    );
    Extraction::Entries(entries)
}

// ── Tests ──
