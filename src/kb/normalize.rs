// Query normalization shared by the matcher and the knowledge base loader.
//
// Lowercase, punctuation becomes whitespace, whitespace runs collapse to one space.

use regex::Regex;
use std::sync::OnceLock;

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"))
}

/// Normalize free text for matching
///
/// - Lowercases
/// - Replaces every non-word, non-space character with a space
/// - Collapses whitespace and trims the edges
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = punctuation().replace_all(&lower, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split already-normalized text into tokens
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// True when `word` appears as a whole token of `normalized`
pub fn has_word(normalized: &str, word: &str) -> bool {
    tokens(normalized).iter().any(|t| *t == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Where is the Library?"), "where is the library");
        assert_eq!(normalize("  Hornbill---Coffee!!  "), "hornbill coffee");
        assert_eq!(normalize("Mechanical(C)Block"), "mechanical c block");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize("Show me the MAP, please...");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_has_word() {
        assert!(has_word("show map please", "map"));
        assert!(!has_word("show mapping", "map"));
    }
}
