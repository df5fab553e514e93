use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    LABEL_FONT_SIZE, MASK_RADIUS, MASK_SIZE, MAX_FONT_SIZE, MAX_WORDS, MIN_FONT_SIZE,
};

/// Layout and styling parameters for masked word clouds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudOptions {
    pub max_words: usize,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub font_step: u32,
    /// Weight of relative frequency when sizing each next word (0 = rank only).
    pub relative_scaling: f64,
    /// Empty pixels kept around every placed word.
    pub margin: u32,
    pub label_font_size: f32,
    pub label_box_alpha: f32,
    pub mask_size: u32,
    pub mask_radius: u32,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            max_words: MAX_WORDS,
            max_font_size: MAX_FONT_SIZE,
            min_font_size: MIN_FONT_SIZE,
            font_step: 1,
            relative_scaling: 0.5,
            margin: 2,
            label_font_size: LABEL_FONT_SIZE,
            label_box_alpha: 0.5,
            mask_size: MASK_SIZE,
            mask_radius: MASK_RADIUS,
        }
    }
}
