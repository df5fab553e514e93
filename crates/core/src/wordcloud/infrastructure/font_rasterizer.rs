use std::path::Path;

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::wordcloud::domain::cloud_renderer::RenderError;
use crate::wordcloud::domain::text_rasterizer::TextRasterizer;

/// TrueType/OpenType text rasterizer using `ab_glyph`.
///
/// The font must cover every script it is asked to draw; missing glyphs
/// render as the font's `.notdef` box.
pub struct FontRasterizer {
    font: FontVec,
}

impl FontRasterizer {
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let rasterizer = Self::from_bytes(bytes)?;
        log::info!("Loaded font {}", path.display());
        Ok(rasterizer)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| RenderError::InvalidFont)?;
        Ok(Self { font })
    }

    /// Positions glyphs on a baseline at the font's ascent; returns them
    /// with the total advance width.
    fn layout(&self, text: &str, px: f32) -> (Vec<Glyph>, f32) {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous = None;

        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        (glyphs, caret)
    }
}

impl TextRasterizer for FontRasterizer {
    fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        let (_, advance) = self.layout(text, px);
        let scaled = self.font.as_scaled(PxScale::from(px));
        let height = scaled.ascent() - scaled.descent();
        (advance.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, px: f32, color: Rgb<u8>) {
        let (glyphs, _) = self.layout(text, px);
        let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let ox = x + bounds.min.x.floor() as i32;
            let oy = y + bounds.min.y.floor() as i32;
            outlined.draw(|gx, gy, coverage| {
                let px = ox + gx as i32;
                let py = oy + gy as i32;
                if px < 0 || py < 0 || px >= cw || py >= ch {
                    return;
                }
                let coverage = coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for c in 0..3 {
                    let base = f32::from(pixel.0[c]);
                    let ink = f32::from(color.0[c]);
                    pixel.0[c] = (base + (ink - base) * coverage).round() as u8;
                }
            });
        }
    }
}
