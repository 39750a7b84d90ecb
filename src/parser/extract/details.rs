use scraper::Html;
use tracing::debug;

use crate::parser::schema::{DetailRow, HeadingContext, PageSchema};

const DECLINABILITY_LABEL: &str = "odmienność";
const OCCURRENCE_LABEL: &str = "występowanie";
const YES: &str = "tak";

/// Attributes recovered from a heading's hidden detail block. Both fields
/// stay `None` when the block can't be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub declinable: Option<bool>,
    pub source_dictionary: Option<String>,
}

pub fn resolve<S: PageSchema + ?Sized>(
    schema: &S,
    doc: &Html,
    ctx: &HeadingContext<'_>,
) -> Details {
    let Some(id) = schema.detail_trigger_id(ctx) else {
        return Details::default();
    };
    let Some(block) = schema.detail_block(doc, id) else {
        debug!(id, "detail trigger points at a missing block");
        return Details::default();
    };
    read_rows(&schema.detail_rows(block))
}

/// Interpret detail rows by exact label. Unknown labels are ignored; a later
/// row with the same label overrides an earlier one.
pub fn read_rows(rows: &[DetailRow]) -> Details {
    let mut details = Details::default();
    for row in rows {
        match row.label.as_str() {
            DECLINABILITY_LABEL => details.declinable = Some(row.value == YES),
            OCCURRENCE_LABEL => details.source_dictionary = Some(row.value.clone()),
            _ => {}
        }
    }
    details
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::SjpSchema;

    fn row(label: &str, value: &str) -> DetailRow {
        DetailRow {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn both_labels() {
        let d = read_rows(&[row("odmienność", "tak"), row("występowanie", "SJP PWN")]);
        assert_eq!(d.declinable, Some(true));
        assert_eq!(d.source_dictionary.as_deref(), Some("SJP PWN"));
    }

    #[test]
    fn anything_but_tak_is_false() {
        assert_eq!(read_rows(&[row("odmienność", "nie")]).declinable, Some(false));
        assert_eq!(read_rows(&[row("odmienność", "Tak")]).declinable, Some(false));
        assert_eq!(read_rows(&[row("odmienność", "")]).declinable, Some(false));
    }

    #[test]
    fn labels_matched_exactly() {
        let d = read_rows(&[row("Odmienność", "tak"), row("występowanie:", "SJP")]);
        assert_eq!(d, Details::default());
    }

    #[test]
    fn unknown_rows_ignored() {
        let d = read_rows(&[row("dodano", "2005"), row("odmienność", "tak")]);
        assert_eq!(d.declinable, Some(true));
        assert!(d.source_dictionary.is_none());
    }

    #[test]
    fn empty_source_is_kept_empty() {
        assert_eq!(
            read_rows(&[row("występowanie", "")]).source_dictionary.as_deref(),
            Some("")
        );
    }

    #[test]
    fn blank_cells_in_resolved_block() {
        let d = resolve_first(
            r#"<h1>kot</h1><p>ok</p><p><a class="lc" onclick="dopen(4, 1)">kot</a></p>
               <div id="d4"><table class="wtab">
                 <tr><th scope="row">występowanie</th><td> </td></tr>
                 <tr><th scope="row">odmienność</th></tr>
               </table></div>"#,
        );
        assert_eq!(d.source_dictionary.as_deref(), Some(""));
        assert_eq!(d.declinable, Some(false));
    }

    fn resolve_first(html: &str) -> Details {
        let doc = Html::parse_document(html);
        let schema = SjpSchema;
        let ctx = schema.context(schema.headings(&doc)[0]);
        resolve(&schema, &doc, &ctx)
    }

    #[test]
    fn no_link_no_details() {
        let d = resolve_first("<h1>kot</h1><p>ok</p><p>bez linku</p>");
        assert_eq!(d, Details::default());
    }

    #[test]
    fn link_without_dopen() {
        let d = resolve_first(
            r#"<h1>kot</h1><p>ok</p><p><a class="lc" onclick="return false;">kot</a></p>
               <div id="d1"><table class="wtab"><tr><th scope="row">odmienność</th><td>tak</td></tr></table></div>"#,
        );
        assert_eq!(d, Details::default());
    }

    #[test]
    fn dangling_id() {
        let d = resolve_first(
            r#"<h1>kot</h1><p>ok</p><p><a class="lc" onclick="dopen(5, 1)">kot</a></p>
               <div id="d6"><table class="wtab"><tr><th scope="row">odmienność</th><td>tak</td></tr></table></div>"#,
        );
        assert_eq!(d, Details::default());
    }

    #[test]
    fn values_do_not_cross_rows() {
        let d = resolve_first(
            r#"<h1>kot</h1><p>ok</p><p><a class="lc" onclick="dopen(9, 1)">kot</a></p>
               <div id="d9"><table class="wtab">
                 <tr><th scope="row">występowanie</th><td>SJP PWN; Słownik gramatyczny</td></tr>
                 <tr><th scope="row">odmienność</th><td>nie</td></tr>
               </table></div>"#,
        );
        assert_eq!(d.declinable, Some(false));
        assert_eq!(d.source_dictionary.as_deref(), Some("SJP PWN; Słownik gramatyczny"));
    }
}
