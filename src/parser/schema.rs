//! Page layout knowledge for sjp.pl.
//!
//! Everything that depends on how the site *presents* an entry (inline
//! styles, class tokens, the `dopen` trigger, the hidden `#d<id>` blocks)
//! lives behind [`PageSchema`], so the pipeline in `parser::extract` never
//! touches a selector directly. When the site markup changes, add a new
//! schema and bump its version rather than patching the pipeline.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::trigger::parse_trigger_id;

static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static DETAIL_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.lc").unwrap());
static ID_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[id]").unwrap());
static DETAIL_ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wtab tr").unwrap());
static ROW_HEADER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"th[scope="row"]"#).unwrap());
static ROW_VALUE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static DEFINITION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"p[style*="font: medium/1.4 sans-serif"]"#).unwrap());

const NOT_FOUND_MARKER: char = '✕';
const DETAIL_ID_PREFIX: &str = "d";

/// The elements surrounding one headword heading.
#[derive(Debug, Clone, Copy)]
pub struct HeadingContext<'a> {
    pub heading: ElementRef<'a>,
    /// Paragraph directly after the heading ("dopuszczalne w grach" line).
    pub acceptability: Option<ElementRef<'a>>,
    /// Paragraph after that, carrying the inflection link.
    pub link_paragraph: Option<ElementRef<'a>>,
}

/// One `label → value` row of a detail table, both sides trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

pub trait PageSchema {
    /// Identifies the markup revision this schema was written against.
    fn version(&self) -> &'static str;

    fn is_not_found(&self, doc: &Html) -> bool;

    /// Candidate headword headings, in document order.
    fn headings<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>>;

    fn context<'a>(&self, heading: ElementRef<'a>) -> HeadingContext<'a>;

    fn detail_trigger_id(&self, ctx: &HeadingContext<'_>) -> Option<u64>;

    fn detail_block<'a>(&self, doc: &'a Html, id: u64) -> Option<ElementRef<'a>>;

    /// Rows of the key/value table inside a detail block. Each value comes
    /// from the same row as its label.
    fn detail_rows(&self, block: ElementRef<'_>) -> Vec<DetailRow>;

    fn definition_block<'a>(&self, ctx: &HeadingContext<'a>) -> Option<ElementRef<'a>>;
}

/// Layout of sjp.pl word pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjpSchema;

impl PageSchema for SjpSchema {
    fn version(&self) -> &'static str {
        "sjp.pl/v1"
    }

    fn is_not_found(&self, doc: &Html) -> bool {
        doc.select(&HEADING_SEL)
            .any(|h| h.text().any(|t| t.contains(NOT_FOUND_MARKER)))
    }

    fn headings<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&HEADING_SEL).collect()
    }

    fn context<'a>(&self, heading: ElementRef<'a>) -> HeadingContext<'a> {
        let acceptability = next_paragraph(heading);
        let link_paragraph = acceptability.and_then(next_paragraph);
        HeadingContext {
            heading,
            acceptability,
            link_paragraph,
        }
    }

    fn detail_trigger_id(&self, ctx: &HeadingContext<'_>) -> Option<u64> {
        let link = ctx.link_paragraph?.select(&DETAIL_LINK_SEL).next()?;
        link.value().attr("onclick").and_then(parse_trigger_id)
    }

    fn detail_block<'a>(&self, doc: &'a Html, id: u64) -> Option<ElementRef<'a>> {
        let target = format!("{}{}", DETAIL_ID_PREFIX, id);
        doc.select(&ID_SEL)
            .find(|el| el.value().attr("id") == Some(target.as_str()))
    }

    fn detail_rows(&self, block: ElementRef<'_>) -> Vec<DetailRow> {
        block
            .select(&DETAIL_ROW_SEL)
            .filter_map(|row| {
                let header = row.select(&ROW_HEADER_SEL).next()?;
                // A labelled row without a value cell reads as an empty value
                let value: String = row
                    .select(&ROW_VALUE_SEL)
                    .flat_map(|td| td.text())
                    .collect();
                Some(DetailRow {
                    label: element_text(header),
                    value: value.trim().to_string(),
                })
            })
            .collect()
    }

    fn definition_block<'a>(&self, ctx: &HeadingContext<'a>) -> Option<ElementRef<'a>> {
        // Searched from the link paragraph onwards, across later headings too
        ctx.link_paragraph?
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| DEFINITION_SEL.matches(el))
    }
}

/// Next element sibling, but only if it is a `<p>`.
fn next_paragraph(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sib| sib.value().name() == "p")
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
