pub(crate) const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
pub(crate) const BOUNDARY: [u8; 4] = [0, 0, 0, 255];
pub(crate) const GRATICULE: [u8; 4] = [128, 128, 128, 255];

/// Maps a normalized value in `[0, 1]` to the "jet" colour map, running from
/// dark blue through cyan, yellow and red to dark red.
pub(crate) fn jet(t: f32) -> [u8; 4] {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let channel = |offset: f32| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    [channel(3.0), channel(2.0), channel(1.0), 255]
}

/// Normalizes `value` into `[0, 1]` over `(min, max)`; a degenerate range
/// maps everything to the middle of the colour map.
pub(crate) fn normalize(value: f32, (min, max): (f32, f32)) -> f32 {
    let range = max - min;
    if range.abs() < f32::EPSILON {
        0.5
    } else {
        (value - min) / range
    }
}
