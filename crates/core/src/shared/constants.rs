/// Summary key carrying the total number of classified words.
pub const TOTAL_WORDS_KEY: &str = "총단어 수";

/// Unit suffix used in per-category summary strings.
pub const COUNT_UNIT: &str = "개";

pub const MASK_SIZE: u32 = 600;
pub const MASK_RADIUS: u32 = 300;

pub const MAX_WORDS: usize = 200;
pub const MAX_FONT_SIZE: u32 = 100;
pub const MIN_FONT_SIZE: u32 = 4;
pub const LABEL_FONT_SIZE: f32 = 24.0;

/// Metadata `type` for rendered word-cloud images.
pub const WORDCLOUD_IMAGE_TYPE: &str = "wordcloud";

pub const DEFAULT_MECAB_COMMAND: &str = "mecab";

/// Longest line handed to the mecab CLI, kept under its default 8192-byte
/// input buffer; longer lines would be split mid-character.
pub const MECAB_MAX_LINE_BYTES: usize = 8000;
pub const DEFAULT_FONT_PATH: &str = "NanumFontSetup_TTF_GOTHIC/NanumGothic.ttf";
