use scraper::ElementRef;

const INADMISSIBLE: &str = "niedopuszczalne";

/// Whether the word may be played in word games, judged from the paragraph
/// right after its heading. No paragraph means nothing forbids it.
pub fn classify(paragraph: Option<ElementRef<'_>>) -> bool {
    paragraph.map_or(true, |p| is_acceptable(&p.text().collect::<String>()))
}

pub fn is_acceptable(text: &str) -> bool {
    !text.contains(INADMISSIBLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn plain_substring() {
        assert!(is_acceptable("dopuszczalne w grach"));
        assert!(!is_acceptable("niedopuszczalne w grach"));
        assert!(!is_acceptable("  (niedopuszczalne)  "));
    }

    #[test]
    fn markup_ignored() {
        let doc = Html::parse_document(
            r#"<p><span style="color: #b00">niedopuszczalne</span> w grach <a href="/zasady">(i)</a></p>"#,
        );
        let p = doc.select(&Selector::parse("p").unwrap()).next();
        assert!(!classify(p));
    }

    #[test]
    fn missing_paragraph_is_acceptable() {
        assert!(classify(None));
    }
}
