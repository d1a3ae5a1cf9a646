//! Text normalization for loose comparison.
//!
//! Callers normalize at comparison time. Token text is never normalized in
//! place, so the original casing survives for the acronym rule.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison.
///
/// - NFKC compatibility normalization
/// - Lowercase
/// - Strip diacritics (NFD, then drop combining marks)
/// - Replace anything that is not a letter, digit, `/` or whitespace with a space
/// - Collapse whitespace and trim
///
/// Total and idempotent.
pub fn normalize(text: &str) -> String {
    let stripped: String = strip_marks(text)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '/' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    collapse_whitespace(&stripped)
}

/// Like [`normalize`], but punctuation is kept.
///
/// Used for free words, where `c++` must not shrink to `c`.
pub fn fold(text: &str) -> String {
    collapse_whitespace(&strip_marks(text))
}

/// NFKC, lowercase, then NFD with combining marks removed.
fn strip_marks(text: &str) -> String {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    lowered.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse runs of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = !result.is_empty();
        } else {
            if pending_space {
                result.push(' ');
                pending_space = false;
            }
            result.push(c);
        }
    }

    result
}

/// Whether the normalized `needle` occurs inside the normalized `haystack`.
///
/// A needle that normalizes to nothing (pure punctuation) never matches.
pub fn normalized_contains(needle: &str, haystack: &str) -> bool {
    let needle = normalize(needle);
    if needle.is_empty() {
        return false;
    }
    normalize(haystack).contains(&needle)
}

/// Whether the folded `needle` occurs inside the folded `haystack`.
pub fn folded_contains(needle: &str, haystack: &str) -> bool {
    let needle = fold(needle);
    if needle.is_empty() {
        return false;
    }
    fold(haystack).contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses() {
        assert_eq!(normalize("  Machine   Learning  "), "machine learning");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("Études Françaises"), "etudes francaises");
        assert_eq!(normalize("Naïve Bayes"), "naive bayes");
        assert_eq!(normalize("Müller"), "muller");
    }

    #[test]
    fn test_replaces_punctuation_but_keeps_slash() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("10.1038/nature12373"), "10 1038/nature12373");
        assert_eq!(normalize("RNA-seq: a review"), "rna seq a review");
    }

    #[test]
    fn test_applies_compatibility_forms() {
        // Full-width letters and the "fi" ligature fold to plain ASCII
        assert_eq!(normalize("ＡＩ"), "ai");
        assert_eq!(normalize("ﬁnite"), "finite");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!! ---"), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for s in ["Études: Ωmega–Δ", "  a\t\tb\n", "ＡＩ ﬁnite", "Smith, J. (2024)"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_collapse_keeps_inner_text() {
        assert_eq!(collapse_whitespace("\t a  b \n"), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_fold_keeps_punctuation() {
        assert_eq!(fold("  García-Márquez,  C++ "), "garcia-marquez, c++");
        assert_eq!(fold("ＡＩ"), "ai");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_folded_contains_does_not_drop_symbols() {
        assert!(folded_contains("garcia", "Lucía García"));
        assert!(folded_contains("c++", "Modern C++ idioms"));
        assert!(!folded_contains("c++", "deep learning basics"));
        assert!(!folded_contains("c#", "deep learning basics"));
        assert!(!folded_contains("a.", "Roads and Developers"));
        assert!(!folded_contains("  ", "anything"));
    }

    #[test]
    fn test_contains_uses_normalized_forms() {
        assert!(normalized_contains("etude", "Une Étude"));
        assert!(normalized_contains("RNA structure", "Deep Learning for RNA-Structure"));
        assert!(!normalized_contains("...", "anything"));
    }
}
