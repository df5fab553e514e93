use super::tagged_token::TaggedToken;

/// Domain interface for morphological analysis.
///
/// Implementations split text into tokens and return them in original
/// order. Tokens without a resolvable tag are dropped, never reported as
/// errors.
pub trait Tagger: Send {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, Box<dyn std::error::Error>>;
}
