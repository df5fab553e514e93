use image::{Rgb, RgbImage};

/// Measures and draws text onto an RGB canvas.
///
/// The font is fixed when the implementation is constructed, so separate
/// instances never share font state.
pub trait TextRasterizer: Send {
    /// Width and height of the box that `draw` covers for `text` at `px`.
    fn measure(&self, text: &str, px: f32) -> (u32, u32);

    /// Draws `text` with the top-left of its box at `(x, y)`.
    ///
    /// Pixels falling outside the canvas are clipped.
    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, px: f32, color: Rgb<u8>);
}

/// Blends `color` over a rectangle with the given opacity, clipped to the canvas.
pub fn blend_rect(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgb<u8>,
    alpha: f32,
) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = (i64::from(x) + i64::from(width)).clamp(0, i64::from(canvas.width())) as u32;
    let y1 = (i64::from(y) + i64::from(height)).clamp(0, i64::from(canvas.height())) as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            let pixel = canvas.get_pixel_mut(px, py);
            for c in 0..3 {
                let base = f32::from(pixel.0[c]);
                let over = f32::from(color.0[c]);
                pixel.0[c] = (base * (1.0 - alpha) + over * alpha).round() as u8;
            }
        }
    }
}
