use std::sync::LazyLock;

use regex::Regex;

// dopen(<id>, <flag>): only the first argument matters
static DOPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"dopen\(\s*(\d+)").unwrap());

/// Pull the detail-block id out of an `onclick` trigger such as
/// `return dopen(42, 1);`. Anything that doesn't look like a `dopen` call
/// (or overflows `u64`) yields `None`.
pub fn parse_trigger_id(onclick: &str) -> Option<u64> {
    DOPEN_RE
        .captures(onclick)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_onclick() {
        assert_eq!(parse_trigger_id("return dopen(42, 1);"), Some(42));
    }

    #[test]
    fn whitespace_inside_call() {
        assert_eq!(parse_trigger_id("dopen( 1337 ,0)"), Some(1337));
    }

    #[test]
    fn first_call_wins() {
        assert_eq!(parse_trigger_id("dopen(7, 1); dopen(8, 1)"), Some(7));
    }

    #[test]
    fn other_function_ignored() {
        assert_eq!(parse_trigger_id("return dclose(42, 1);"), None);
        assert_eq!(parse_trigger_id(""), None);
    }

    #[test]
    fn non_numeric_argument() {
        assert_eq!(parse_trigger_id("dopen(id, 1)"), None);
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(parse_trigger_id("dopen(99999999999999999999999, 1)"), None);
    }
}
