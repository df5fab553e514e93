use image::Rgb;

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Maps `t` in `[0, 1]` onto the viridis colormap by linear interpolation.
///
/// Values outside the range are clamped; NaN maps to the low end.
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;

    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = f64::from(VIRIDIS[lo][i]);
        let b = f64::from(VIRIDIS[hi][i]);
        *channel = (a + (b - a) * frac).round() as u8;
    }
    Rgb(out)
}
