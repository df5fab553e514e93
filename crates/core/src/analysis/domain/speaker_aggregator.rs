use std::collections::BTreeMap;

use super::transcript_row::TranscriptRow;

/// Groups rows by `speaker` and joins each speaker's utterances with a
/// single space, preserving row order within the group.
pub fn aggregate_by_speaker(rows: &[TranscriptRow]) -> BTreeMap<String, String> {
    group_texts(rows, |row| &row.speaker).into_iter().collect()
}

/// Groups rows by `speaker_label`, in order of each label's first
/// appearance.
pub fn aggregate_by_label(rows: &[TranscriptRow]) -> Vec<(String, String)> {
    group_texts(rows, |row| &row.speaker_label)
}

fn group_texts<F>(rows: &[TranscriptRow], key: F) -> Vec<(String, String)>
where
    F: Fn(&TranscriptRow) -> &String,
{
    let mut order: Vec<&String> = Vec::new();
    let mut groups: BTreeMap<&String, Vec<&str>> = BTreeMap::new();
    for row in rows {
        let k = key(row);
        let texts = groups.entry(k).or_insert_with(|| {
            order.push(k);
            Vec::new()
        });
        texts.push(&row.text_edited);
    }
    order
        .into_iter()
        .map(|k| (k.clone(), groups[k].join(" ")))
        .collect()
}
