use image::Rgb;

use crate::analysis::domain::noun_frequency::WordFrequency;

use super::circular_mask::{CircularMask, PAINTABLE};
use super::cloud_options::CloudOptions;
use super::colormap::viridis;
use super::text_rasterizer::TextRasterizer;

/// A word positioned on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb<u8>,
}

/// Occupied-pixel grid with a summed-area table for O(1) box queries.
///
/// Forbidden mask pixels start out occupied; placed word boxes are added
/// as layout proceeds.
struct Occupancy {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    integral: Vec<u32>,
    free: usize,
}

impl Occupancy {
    fn from_mask(mask: &CircularMask) -> Self {
        let size = mask.size();
        let occupied: Vec<bool> = mask.as_ndarray().iter().map(|&v| v != PAINTABLE).collect();
        let free = occupied.iter().filter(|&&o| !o).count();
        let mut occupancy = Self {
            width: size,
            height: size,
            occupied,
            integral: vec![0; (size as usize + 1) * (size as usize + 1)],
            free,
        };
        occupancy.rebuild();
        occupancy
    }

    fn rebuild(&mut self) {
        let w = self.width as usize;
        let stride = w + 1;
        for row in 0..self.height as usize {
            let mut row_sum = 0u32;
            for col in 0..w {
                row_sum += u32::from(self.occupied[row * w + col]);
                self.integral[(row + 1) * stride + col + 1] =
                    self.integral[row * stride + col + 1] + row_sum;
            }
        }
    }

    fn box_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let stride = self.width as usize + 1;
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + w as usize, y0 + h as usize);
        self.integral[y1 * stride + x1] + self.integral[y0 * stride + x0]
            - self.integral[y0 * stride + x1]
            - self.integral[y1 * stride + x0]
    }

    /// Free top-left position for a `w`×`h` box whose centre lies closest
    /// to the canvas centre. Ties go to the first position in row-major order.
    fn find_position(&self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }
        if (w as usize) * (h as usize) > self.free {
            return None;
        }
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        let mut best: Option<((u32, u32), f64)> = None;
        for y in 0..=(self.height - h) {
            for x in 0..=(self.width - w) {
                if self.box_sum(x, y, w, h) != 0 {
                    continue;
                }
                let dx = f64::from(x) + f64::from(w) / 2.0 - cx;
                let dy = f64::from(y) + f64::from(h) / 2.0 - cy;
                let dist = dx * dx + dy * dy;
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some(((x, y), dist));
                }
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let width = self.width as usize;
        for row in y as usize..(y + h) as usize {
            for col in x as usize..(x + w) as usize {
                let cell = &mut self.occupied[row * width + col];
                if !*cell {
                    *cell = true;
                    self.free -= 1;
                }
            }
        }
        self.rebuild();
    }
}

/// Ranks words by frequency, descending; ties by word.
fn rank(frequencies: &WordFrequency, max_words: usize) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = frequencies
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .filter(|&(_, count)| count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_words);
    ranked
}

/// Places words inside the mask's paintable region, largest first.
///
/// Each word starts at a size derived from the previous word's size and
/// the ratio of their frequencies, then shrinks by `font_step` until it
/// fits. Layout ends at the first word that cannot fit at
/// `min_font_size`.
pub fn layout_words(
    frequencies: &WordFrequency,
    mask: &CircularMask,
    rasterizer: &dyn TextRasterizer,
    options: &CloudOptions,
) -> Vec<PlacedWord> {
    let ranked = rank(frequencies, options.max_words);
    let Some(&(_, top)) = ranked.first() else {
        return Vec::new();
    };
    let max_count = top as f64;
    let rs = options.relative_scaling;
    let min_size = f64::from(options.min_font_size);
    let step = f64::from(options.font_step.max(1));
    let margin = options.margin;

    let mut occupancy = Occupancy::from_mask(mask);
    let mut placed = Vec::new();
    let mut font_size = f64::from(options.max_font_size);
    let mut last_freq = 1.0;

    for (word, count) in ranked {
        let freq = count as f64 / max_count;
        if rs != 0.0 {
            font_size = ((rs * (freq / last_freq) + (1.0 - rs)) * font_size).round();
        }

        let mut fit = None;
        while font_size >= min_size {
            let (w, h) = rasterizer.measure(word, font_size as f32);
            if let Some((x, y)) = occupancy.find_position(w + margin, h + margin) {
                fit = Some((x, y, w, h));
                break;
            }
            font_size -= step;
        }
        let Some((x, y, w, h)) = fit else {
            log::debug!("Layout stopped at '{word}': no room above {min_size}px");
            break;
        };

        occupancy.mark(x, y, w + margin, h + margin);
        placed.push(PlacedWord {
            word: word.to_string(),
            font_size: font_size as f32,
            x: x + margin / 2,
            y: y + margin / 2,
            width: w,
            height: h,
            color: viridis(freq),
        });
        last_freq = freq;
    }

    placed
}
