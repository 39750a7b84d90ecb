use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

// scraper serialises every line break as `<br>`, hand-written fixtures may not
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").unwrap());

/// Meanings of one definition block, in page order.
pub fn from_block(block: ElementRef<'_>) -> Vec<String> {
    segment(split_fragments(&block.inner_html()))
}

/// Split definition markup on line breaks into normalised, non-empty text
/// fragments. Inline tags and entities inside a fragment are reduced to
/// their text.
pub fn split_fragments(html: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(html)
        .map(fragment_text)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Turn fragments into meanings.
///
/// A leading `label:` fragment (only when more fragments follow) becomes a
/// prefix shared by every meaning instead of a meaning of its own. List
/// markers like `12. ` are stripped; a fragment holding nothing but a marker
/// becomes an empty meaning.
pub fn segment(mut fragments: Vec<String>) -> Vec<String> {
    let prefix = if fragments.len() > 1 && fragments[0].ends_with(':') {
        format!("{} ", fragments.remove(0))
    } else {
        String::new()
    };

    fragments
        .iter()
        .map(|f| format!("{}{}", prefix, LIST_MARKER_RE.replace(f, "")).trim().to_string())
        .collect()
}

fn fragment_text(fragment: &str) -> String {
    let fragment = fragment.replace("&nbsp;", " ");
    let text: String = Html::parse_fragment(&fragment)
        .root_element()
        .text()
        .collect();
    text.replace('\u{a0}', " ").trim().to_string()
}

// ── Tests ──
