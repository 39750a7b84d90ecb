use crate::parser::extract::Entry;

const NO_INFO: &str = "no information";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Plain-text block for one entry, meanings numbered from 1.
pub fn entry_text(entry: &Entry) -> String {
    let mut out = format!("{}\n", entry.word);
    out.push_str(&format!(
        "  acceptable in word games: {}\n",
        yes_no(entry.acceptable_in_games)
    ));
    out.push_str(&format!(
        "  declinable:               {}\n",
        entry.declinable.map(yes_no).unwrap_or(NO_INFO)
    ));
    out.push_str(&format!(
        "  source dictionary:        {}\n",
        entry
            .source_dictionary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_INFO)
    ));
    for (i, meaning) in entry.meanings.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, meaning));
    }
    out
}

/// All entries separated by a rule line.
pub fn entries_text(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(entry_text)
        .collect::<Vec<_>>()
        .join(&format!("{}\n", "-".repeat(40)))
}
