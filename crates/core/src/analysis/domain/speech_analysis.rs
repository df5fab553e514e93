use std::collections::BTreeMap;

use crate::tagging::domain::tagger::Tagger;

use super::noun_frequency::{count_words, extract_nouns, WordFrequency};
use super::pos_classifier::classify;
use super::pos_summary::{summarize, PosSummary};
use super::speaker_aggregator::aggregate_by_speaker;
use super::transcript_row::TranscriptRow;

/// Tags one text blob and summarizes its part-of-speech distribution.
pub fn analyze_text(
    tagger: &dyn Tagger,
    text: &str,
) -> Result<PosSummary, Box<dyn std::error::Error>> {
    let tokens = tagger.tag(text)?;
    Ok(summarize(&classify(&tokens)))
}

/// Per-speaker summaries, keyed by the rows' `speaker` field.
pub fn analyze_speakers(
    tagger: &dyn Tagger,
    rows: &[TranscriptRow],
) -> Result<BTreeMap<String, PosSummary>, Box<dyn std::error::Error>> {
    let mut summaries = BTreeMap::new();
    for (speaker, text) in aggregate_by_speaker(rows) {
        let summary = analyze_text(tagger, &text)?;
        summaries.insert(speaker, summary);
    }
    Ok(summaries)
}

/// Noun frequencies for one text blob, ready for cloud rendering.
pub fn noun_frequencies(
    tagger: &dyn Tagger,
    text: &str,
) -> Result<WordFrequency, Box<dyn std::error::Error>> {
    let tokens = tagger.tag(text)?;
    Ok(count_words(&extract_nouns(&tokens)))
}
