use ndarray::{Array2, ArrayView2};

use crate::shared::constants::{MASK_RADIUS, MASK_SIZE};

pub const PAINTABLE: u8 = 0;
pub const FORBIDDEN: u8 = 255;

/// Square bitmap whose centred disc is paintable and whose remainder is
/// forbidden to the cloud layout.
///
/// Indexed `[row, col]`; a pixel is paintable when
/// `(row - c)² + (col - c)² <= radius²` with `c = size / 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularMask {
    pixels: Array2<u8>,
    radius: u32,
}

impl CircularMask {
    pub fn new(size: u32, radius: u32) -> Self {
        let center = i64::from(size / 2);
        let r_sq = i64::from(radius) * i64::from(radius);
        let pixels = Array2::from_shape_fn((size as usize, size as usize), |(row, col)| {
            let dy = row as i64 - center;
            let dx = col as i64 - center;
            if dx * dx + dy * dy <= r_sq {
                PAINTABLE
            } else {
                FORBIDDEN
            }
        });
        Self { pixels, radius }
    }

    pub fn size(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn get(&self, row: u32, col: u32) -> u8 {
        self.pixels[[row as usize, col as usize]]
    }

    pub fn is_paintable(&self, row: u32, col: u32) -> bool {
        self.get(row, col) == PAINTABLE
    }

    pub fn paintable_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == PAINTABLE).count()
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }
}

impl Default for CircularMask {
    fn default() -> Self {
        Self::new(MASK_SIZE, MASK_RADIUS)
    }
}
