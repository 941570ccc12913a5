//! Labels drawn with an embedded TrueType font.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale, point};

/// DejaVu Sans Mono, see `assets/DejaVuSansMono-LICENSE`.
const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

pub(crate) struct Typeface {
    font: Font<'static>,
    scale: Scale,
    size: u32,
}

impl Typeface {
    /// Loads the embedded font at `size` pixels; `None` if the font data
    /// cannot be parsed.
    pub(crate) fn load(size: u32) -> Option<Self> {
        let font = Font::try_from_bytes(FONT_DATA)?;
        Some(Self {
            font,
            scale: Scale::uniform(size as f32),
            size,
        })
    }

    pub(crate) fn line_height(&self) -> u32 {
        self.size
    }

    /// Returns the advance width of `text` in pixels.
    pub(crate) fn width(&self, text: &str) -> u32 {
        self.font
            .layout(text, self.scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .map_or(0, |w| w.ceil().max(0.0) as u32)
    }

    /// Draws `text` with its top-left corner at `(x, y)`; parts falling off
    /// the image are clipped.
    pub(crate) fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, text: &str, color: [u8; 4]) {
        draw_text_mut(image, Rgba(color), x, y, self.scale, &self.font, text);
    }
}

pub(crate) fn latitude_label(lat: f64) -> String {
    if lat > 0.0 {
        format!("{lat}N")
    } else if lat < 0.0 {
        format!("{}S", -lat)
    } else {
        "0".to_owned()
    }
}

pub(crate) fn longitude_label(lon: f64) -> String {
    let lon = if lon > 180.0 { lon - 360.0 } else { lon };
    if lon > 0.0 && lon < 180.0 {
        format!("{lon}E")
    } else if lon < 0.0 && lon > -180.0 {
        format!("{}W", -lon)
    } else {
        format!("{}", lon.abs())
    }
}

/// Formats a colour bar value with at most two decimals and no trailing
/// zeros.
pub(crate) fn value_label(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0" } else { s }.to_owned()
}
