use std::collections::{BTreeMap, BTreeSet};

use crate::tagging::domain::pos_category::PosCategory;
use crate::tagging::domain::tagged_token::TaggedToken;

/// Tokens collected for one category during a single classification pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryBucket {
    tokens: Vec<String>,
    unique: BTreeSet<String>,
}

impl CategoryBucket {
    pub fn push(&mut self, surface: &str) {
        self.tokens.push(surface.to_string());
        if !self.unique.contains(surface) {
            self.unique.insert(surface.to_string());
        }
    }

    /// Surface forms in input order, duplicates included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn unique_surface_forms(&self) -> &BTreeSet<String> {
        &self.unique
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }
}

/// Buckets for every category, keyed in display order.
pub type PosBuckets = BTreeMap<PosCategory, CategoryBucket>;

/// Sorts tagged tokens into the fixed category set.
///
/// All six categories are present in the result, empty or not. Tokens
/// with unmapped tags are left out of every bucket.
pub fn classify(tokens: &[TaggedToken]) -> PosBuckets {
    let mut buckets: PosBuckets = PosCategory::ALL
        .iter()
        .map(|&c| (c, CategoryBucket::default()))
        .collect();

    for token in tokens {
        if let Some(category) = token.category() {
            buckets.entry(category).or_default().push(&token.surface);
        }
    }
    buckets
}
