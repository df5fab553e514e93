use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::analysis::domain::noun_frequency::WordFrequency;
use crate::wordcloud::domain::circular_mask::CircularMask;
use crate::wordcloud::domain::cloud_options::CloudOptions;
use crate::wordcloud::domain::cloud_renderer::{CloudRenderer, RenderError, WordCloudImage};
use crate::wordcloud::domain::layout::layout_words;
use crate::wordcloud::domain::text_rasterizer::{blend_rect, TextRasterizer};

use super::font_rasterizer::FontRasterizer;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Horizontal label offset as a fraction of canvas width.
const LABEL_X_FRACTION: f32 = 0.05;

/// Renders masked word clouds to PNG with the speaker label in the
/// top-left corner on a translucent white box.
pub struct MaskedCloudRenderer {
    rasterizer: Box<dyn TextRasterizer>,
    options: CloudOptions,
}

impl MaskedCloudRenderer {
    pub fn new(rasterizer: Box<dyn TextRasterizer>, options: CloudOptions) -> Self {
        Self {
            rasterizer,
            options,
        }
    }

    /// Loads the font once; every render from this instance reuses it.
    pub fn from_font_file(font_path: &Path, options: CloudOptions) -> Result<Self, RenderError> {
        let rasterizer = FontRasterizer::from_file(font_path)?;
        Ok(Self::new(Box::new(rasterizer), options))
    }

    pub fn options(&self) -> &CloudOptions {
        &self.options
    }

    /// Draws the cloud and label onto a fresh canvas the size of the mask.
    fn compose(
        &self,
        frequencies: &WordFrequency,
        mask: &CircularMask,
        speaker_label: &str,
    ) -> (RgbImage, usize) {
        let size = mask.size();
        let mut canvas = RgbImage::from_pixel(size, size, BACKGROUND);

        let words = layout_words(frequencies, mask, self.rasterizer.as_ref(), &self.options);
        for word in &words {
            self.rasterizer.draw(
                &mut canvas,
                &word.word,
                word.x as i32,
                word.y as i32,
                word.font_size,
                word.color,
            );
        }

        self.draw_label(&mut canvas, speaker_label);
        (canvas, words.len())
    }

    fn draw_label(&self, canvas: &mut RgbImage, label: &str) {
        if label.is_empty() {
            return;
        }
        let px = self.options.label_font_size;
        let (text_w, text_h) = self.rasterizer.measure(label, px);
        let pad = (px / 4.0).round() as u32;
        let x = (canvas.width() as f32 * LABEL_X_FRACTION).round() as i32;
        let y = pad as i32;

        blend_rect(
            canvas,
            x,
            y,
            text_w + 2 * pad,
            text_h + 2 * pad,
            BACKGROUND,
            self.options.label_box_alpha,
        );
        self.rasterizer.draw(
            canvas,
            label,
            x + pad as i32,
            y + pad as i32,
            px,
            LABEL_INK,
        );
    }
}

impl CloudRenderer for MaskedCloudRenderer {
    fn render(
        &self,
        frequencies: &WordFrequency,
        mask: &CircularMask,
        speaker_label: &str,
        output_path: Option<&Path>,
    ) -> Result<WordCloudImage, RenderError> {
        let (canvas, word_count) = self.compose(frequencies, mask, speaker_label);
        let png = encode_png(&canvas)?;

        if let Some(path) = output_path {
            write_file(path, &png)?;
            log::debug!("Wrote {} ({} bytes)", path.display(), png.len());
        }

        Ok(WordCloudImage {
            png,
            path: output_path.map(Path::to_path_buf),
            width: canvas.width(),
            height: canvas.height(),
            word_count,
        })
    }
}

fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let to_error = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, bytes).map_err(to_error)
}
