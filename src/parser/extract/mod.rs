pub mod acceptability;
pub mod details;
pub mod meanings;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schema::{element_text, PageSchema};
use details::Details;

/// One headword (or homonym) as listed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    pub acceptable_in_games: bool,
    pub declinable: Option<bool>,
    pub source_dictionary: Option<String>,
    pub meanings: Vec<String>,
}

/// Run every per-heading stage for one heading. `None` when the heading is
/// decorative (blank) or yields no meanings.
pub fn extract_entry<S: PageSchema + ?Sized>(
    schema: &S,
    doc: &Html,
    heading: ElementRef<'_>,
) -> Option<Entry> {
    let word = element_text(heading);
    if word.is_empty() {
        debug!("skipping blank heading");
        return None;
    }

    let ctx = schema.context(heading);
    let acceptable = acceptability::classify(ctx.acceptability);
    let details = details::resolve(schema, doc, &ctx);
    let meanings = schema
        .definition_block(&ctx)
        .map(meanings::from_block)
        .unwrap_or_default();

    if meanings.is_empty() {
        debug!(word = %word, "discarding heading without meanings");
    }
    assemble(word, acceptable, details, meanings)
}

pub fn assemble(
    word: String,
    acceptable_in_games: bool,
    details: Details,
    meanings: Vec<String>,
) -> Option<Entry> {
    if meanings.is_empty() {
        return None;
    }
    Some(Entry {
        word,
        acceptable_in_games,
        declinable: details.declinable,
        source_dictionary: details.source_dictionary,
        meanings,
    })
}

// ── Tests ──
