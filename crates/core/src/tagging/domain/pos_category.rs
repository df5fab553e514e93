/// Part-of-speech classes reported per speaker.
///
/// The tag table is fixed at compile time; declaration order is the
/// order categories appear in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PosCategory {
    ProperNoun,
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
}

impl PosCategory {
    pub const ALL: &[PosCategory] = &[
        PosCategory::ProperNoun,
        PosCategory::Noun,
        PosCategory::Pronoun,
        PosCategory::Verb,
        PosCategory::Adjective,
        PosCategory::Adverb,
    ];

    /// Categories that feed the word cloud.
    pub const NOUNS: &[PosCategory] = &[PosCategory::ProperNoun, PosCategory::Noun];

    /// Maps a Sejong-style tag (as emitted by mecab-ko) to a category.
    ///
    /// Compound tags such as `VV+EP` are not split and therefore unmapped.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NNP" => Some(PosCategory::ProperNoun),
            "NNG" => Some(PosCategory::Noun),
            "NP" => Some(PosCategory::Pronoun),
            "VV" => Some(PosCategory::Verb),
            "VA" => Some(PosCategory::Adjective),
            "MAG" => Some(PosCategory::Adverb),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            PosCategory::ProperNoun => "NNP",
            PosCategory::Noun => "NNG",
            PosCategory::Pronoun => "NP",
            PosCategory::Verb => "VV",
            PosCategory::Adjective => "VA",
            PosCategory::Adverb => "MAG",
        }
    }

    /// Display label used as the summary key.
    pub fn label(self) -> &'static str {
        match self {
            PosCategory::ProperNoun => "고유명사",
            PosCategory::Noun => "명사",
            PosCategory::Pronoun => "대명사",
            PosCategory::Verb => "동사",
            PosCategory::Adjective => "형용사",
            PosCategory::Adverb => "부사",
        }
    }

    pub fn is_noun(self) -> bool {
        Self::NOUNS.contains(&self)
    }
}

impl std::fmt::Display for PosCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
