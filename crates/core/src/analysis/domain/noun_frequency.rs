use std::collections::HashMap;

use crate::tagging::domain::tagged_token::TaggedToken;

/// Noun surface form → occurrence count.
pub type WordFrequency = HashMap<String, usize>;

/// Surface forms tagged as proper or common nouns, in input order.
pub fn extract_nouns(tokens: &[TaggedToken]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.category().is_some_and(|c| c.is_noun()))
        .map(|t| t.surface.clone())
        .collect()
}

/// Tallies nouns, dropping single-character forms.
///
/// Length is measured in characters, so a one-syllable Hangul noun such as
/// `집` is dropped even though it spans three bytes.
pub fn count_words<S: AsRef<str>>(nouns: &[S]) -> WordFrequency {
    let mut counts = WordFrequency::new();
    for noun in nouns {
        let noun = noun.as_ref();
        if noun.chars().count() > 1 {
            *counts.entry(noun.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(surface: &str, tag: &str) -> TaggedToken {
        TaggedToken::new(surface, tag)
    }

    #[test]
    fn test_extract_keeps_only_nnp_and_nng() {
        let tokens = vec![
            tok("서울", "NNP"),
            tok("에서", "JKB"),
            tok("친구", "NNG"),
            tok("나", "NP"),
            tok("만나", "VV"),
        ];
        assert_eq!(extract_nouns(&tokens), vec!["서울", "친구"]);
    }

    #[test]
    fn test_count_tallies_duplicates() {
        let counts = count_words(&["친구", "학교", "친구"]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["친구"], 2);
        assert_eq!(counts["학교"], 1);
    }

    #[test]
    fn test_single_character_nouns_dropped() {
        let counts = count_words(&["집", "책", "a", "학교"]);
        assert_eq!(counts.len(), 1);
        assert!(counts.keys().all(|w| w.chars().count() > 1));
    }

    #[test]
    fn test_only_single_character_nouns_yields_empty() {
        let tokens = vec![tok("집", "NNG"), tok("물", "NNG"), tok("책", "NNP")];
        assert!(count_words(&extract_nouns(&tokens)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(count_words(&empty).is_empty());
        assert!(extract_nouns(&[]).is_empty());
    }
}
