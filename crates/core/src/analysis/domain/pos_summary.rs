use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::shared::constants::{COUNT_UNIT, TOTAL_WORDS_KEY};
use crate::tagging::domain::pos_category::PosCategory;

use super::pos_classifier::PosBuckets;

/// Count and share of one category within a speaker's classified words.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryStat {
    pub category: PosCategory,
    pub count: usize,
    pub unique_count: usize,
    /// Percentage of the classified total, rounded to one decimal.
    pub percentage: f64,
}

impl CategoryStat {
    /// `"{count} 개, {percentage}%"`.
    pub fn formatted(&self) -> String {
        format!("{} {COUNT_UNIT}, {:.1}%", self.count, self.percentage)
    }
}

/// Per-category distribution plus the classified total.
///
/// When nothing was classified every category reports `0 개, 0.0%` and
/// `has_data` is false.
#[derive(Clone, Debug, PartialEq)]
pub struct PosSummary {
    stats: Vec<CategoryStat>,
    total: usize,
    total_unique: usize,
}

impl PosSummary {
    pub fn stats(&self) -> &[CategoryStat] {
        &self.stats
    }

    pub fn get(&self, category: PosCategory) -> Option<&CategoryStat> {
        self.stats.iter().find(|s| s.category == category)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Sum of per-category unique surface forms.
    pub fn total_unique(&self) -> usize {
        self.total_unique
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}

impl Serialize for PosSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stats.len() + 1))?;
        for stat in &self.stats {
            map.serialize_entry(stat.category.label(), &stat.formatted())?;
        }
        map.serialize_entry(TOTAL_WORDS_KEY, &self.total)?;
        map.end()
    }
}

/// Builds the summary for one speaker's buckets.
pub fn summarize(buckets: &PosBuckets) -> PosSummary {
    let total: usize = buckets.values().map(|b| b.len()).sum();
    let total_unique: usize = buckets.values().map(|b| b.unique_len()).sum();

    let stats = PosCategory::ALL
        .iter()
        .map(|&category| {
            let (count, unique_count) = buckets
                .get(&category)
                .map_or((0, 0), |b| (b.len(), b.unique_len()));
            CategoryStat {
                category,
                count,
                unique_count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    PosSummary {
        stats,
        total,
        total_unique,
    }
}

/// `count / total * 100` rounded to one decimal; 0.0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}
