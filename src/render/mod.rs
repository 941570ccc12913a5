//! Map rendering of a parameter grid into an in-memory RGBA image.

use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
    str::FromStr,
};

use image::{Rgba, RgbaImage};

use crate::{
    error::GribViewError,
    record::nearest_position,
    view::ParameterView,
};

mod palette;
pub mod projection;
mod text;

use projection::Frame;
use text::Typeface;

const MARGIN: u32 = 10;
const GAP: u32 = 10;
const PAD: u32 = 3;
const GRATICULE_SPACING: f64 = 10.0;
/// Smallest accepted image width or height in pixels.
pub const MIN_SIZE: u32 = 128;
/// Largest accepted image width or height in pixels.
pub const MAX_SIZE: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorBarOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for ColorBarOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(format!(
                "colour bar orientation must be 'horizontal' or 'vertical', not '{s}'"
            )),
        }
    }
}

impl Display for ColorBarOrientation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub orientation: ColorBarOrientation,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            orientation: ColorBarOrientation::default(),
        }
    }
}

/// A pixel rectangle: left, top, width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    fn right(&self) -> u32 {
        self.left + self.width - 1
    }

    fn bottom(&self) -> u32 {
        self.top + self.height - 1
    }
}

/// A rendered map: RGBA pixels plus the title and the value range the
/// colour bar stands for.
///
/// The title is drawn above the map and also travels as metadata, so that
/// the PNG encoding can carry it in a `Title` text chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    image: RgbaImage,
    title: String,
    value_range: Option<(f32, f32)>,
    map_area: Rect,
    color_bar_area: Rect,
    title_area: Rect,
}

impl RenderedMap {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the RGBA pixels in row-major order.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.value_range
    }

    pub fn map_area(&self) -> Rect {
        self.map_area
    }

    pub fn color_bar_area(&self) -> Rect {
        self.color_bar_area
    }

    /// Returns the band above the map the title is drawn in.
    pub fn title_area(&self) -> Rect {
        self.title_area
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Rgba(color));
        }
    }

    fn outline(&mut self, rect: Rect, color: [u8; 4]) {
        for x in rect.left..=rect.right() {
            self.put(x, rect.top, color);
            self.put(x, rect.bottom(), color);
        }
        for y in rect.top..=rect.bottom() {
            self.put(rect.left, y, color);
            self.put(rect.right(), y, color);
        }
    }

    fn label(&mut self, typeface: &Typeface, x: i64, y: i64, text: &str) {
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        typeface.draw(&mut self.image, clamp(x), clamp(y), text, palette::BOUNDARY);
    }

    /// Encodes the image as PNG, with the title in a `Title` text chunk.
    pub fn to_png(&self) -> Result<Vec<u8>, GribViewError> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.add_text_chunk("Title".to_owned(), self.title.clone())?;
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.image.as_raw())?;
            writer.finish()?;
        }
        Ok(buf)
    }

    pub fn write_png<P>(&self, path: P) -> Result<(), GribViewError>
    where
        P: AsRef<Path>,
    {
        let png = self.to_png()?;
        fs::write(path, png)?;
        Ok(())
    }
}

/// Room taken by text around the map and the colour bar.
struct TextSpace {
    line_height: u32,
    latitude_labels_width: u32,
    value_labels_width: u32,
}

fn layout(options: &RenderOptions, text: &TextSpace) -> (Rect, Rect) {
    let RenderOptions { width, height, .. } = *options;
    // glyph descenders reach below the nominal line height
    let line = text.line_height + text.line_height / 4;
    let left = MARGIN + text.latitude_labels_width + PAD;
    let top = MARGIN + line + PAD;
    // longitude labels run along the bottom of the map
    let below_map = PAD + line;
    match options.orientation {
        ColorBarOrientation::Horizontal => {
            let bar = (height / 20).max(8);
            let map_width = width.saturating_sub(left + MARGIN).max(1);
            let below = below_map + GAP + bar + PAD + line + MARGIN;
            let map_height = height.saturating_sub(top + below).max(1);
            let map_area = Rect {
                left,
                top,
                width: map_width,
                height: map_height,
            };
            let color_bar_area = Rect {
                left,
                top: top + map_height + below_map + GAP,
                width: map_width,
                height: bar,
            };
            (map_area, color_bar_area)
        }
        ColorBarOrientation::Vertical => {
            let bar = (width / 20).max(8);
            let right = GAP + bar + PAD + text.value_labels_width + MARGIN;
            let map_width = width.saturating_sub(left + right).max(1);
            let map_height = height.saturating_sub(top + below_map + MARGIN).max(1);
            let map_area = Rect {
                left,
                top,
                width: map_width,
                height: map_height,
            };
            let color_bar_area = Rect {
                left: left + map_width + GAP,
                top,
                width: bar,
                height: map_height,
            };
            (map_area, color_bar_area)
        }
    }
}

/// Returns the bounds of an axis, widened when it holds a single value so
/// that the projected rectangle is never empty.
fn span(axis: &[f64]) -> Option<(f64, f64)> {
    let (first, last) = (*axis.first()?, *axis.last()?);
    if first < last {
        Some((first, last))
    } else {
        Some((first - 0.5, last + 0.5))
    }
}

fn graticule_lines(min: f64, max: f64) -> impl Iterator<Item = f64> {
    let first = (min / GRATICULE_SPACING).ceil() as i64;
    let last = (max / GRATICULE_SPACING).floor() as i64;
    (first..=last).map(|k| k as f64 * GRATICULE_SPACING)
}

fn font_size(options: &RenderOptions) -> u32 {
    (options.width.min(options.height) / 40).clamp(10, 18)
}

pub(crate) fn render(
    view: &ParameterView,
    options: &RenderOptions,
) -> Result<RenderedMap, GribViewError> {
    let size_range = MIN_SIZE..=MAX_SIZE;
    if !size_range.contains(&options.width) || !size_range.contains(&options.height) {
        return Err(GribViewError::Render(format!(
            "image must be between {MIN_SIZE}x{MIN_SIZE} and {MAX_SIZE}x{MAX_SIZE} pixels, not {}x{}",
            options.width, options.height
        )));
    }
    let buf_len = (options.width as usize)
        .checked_mul(options.height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| GribViewError::Render("image is too large".to_owned()))?;
    let lats = view.latitude_axis();
    let lons = view.longitude_axis();
    let (Some(lat_span), Some(lon_span)) = (span(lats), span(lons)) else {
        return Err(GribViewError::Render("grid has no points".to_owned()));
    };
    let lat_span = (lat_span.0.max(-90.0), lat_span.1.min(90.0));
    let typeface = Typeface::load(font_size(options))
        .ok_or_else(|| GribViewError::Render("embedded font cannot be loaded".to_owned()))?;

    let value_range = view.value_range();
    let value_labels = value_range.map(|(min, max)| (text::value_label(min), text::value_label(max)));
    let latitude_labels = graticule_lines(lat_span.0, lat_span.1)
        .map(|lat| (lat, text::latitude_label(lat)))
        .collect::<Vec<_>>();
    let text_space = TextSpace {
        line_height: typeface.line_height(),
        latitude_labels_width: latitude_labels
            .iter()
            .map(|(_, label)| typeface.width(label))
            .max()
            .unwrap_or(0),
        value_labels_width: value_labels
            .as_ref()
            .map_or(0, |(min, max)| typeface.width(min).max(typeface.width(max))),
    };

    let (map_area, color_bar_area) = layout(options, &text_space);
    let image = RgbaImage::from_raw(options.width, options.height, vec![0; buf_len])
        .ok_or_else(|| GribViewError::Render("image buffer has a wrong size".to_owned()))?;
    let mut map = RenderedMap {
        image,
        title: view.name().to_owned(),
        value_range,
        map_area,
        color_bar_area,
        title_area: Rect {
            left: MARGIN,
            top: MARGIN,
            width: options.width - 2 * MARGIN,
            height: text_space.line_height,
        },
    };

    let frame = Frame::new(
        lat_span,
        lon_span,
        (map_area.left, map_area.top, map_area.width, map_area.height),
    );

    // colour-mapped mesh; each pixel takes the grid point closest to it
    for py in map_area.top..=map_area.bottom() {
        for px in map_area.left..=map_area.right() {
            let (lat, lon) = frame.to_latlon(px, py);
            let cell = nearest_position(lats, lat)
                .zip(nearest_position(lons, lon))
                .and_then(|(row, col)| view.grid().get(row, col))
                .flatten();
            let color = match (cell, value_range) {
                (Some(value), Some(range)) => palette::jet(palette::normalize(value, range)),
                _ => palette::TRANSPARENT,
            };
            map.put(px, py, color);
        }
    }

    let line = i64::from(text_space.line_height);
    for (lat, label) in &latitude_labels {
        let py = frame.row_of(*lat).floor();
        if py >= 0.0 && map_area.contains(map_area.left, py as u32) {
            for px in map_area.left..=map_area.right() {
                map.put(px, py as u32, palette::GRATICULE);
            }
            let x = i64::from(map_area.left - PAD) - i64::from(typeface.width(label));
            map.label(&typeface, x, py as i64 - line / 2, label);
        }
    }
    for lon in graticule_lines(lon_span.0, lon_span.1) {
        let px = frame.col_of(lon).floor();
        if px >= 0.0 && map_area.contains(px as u32, map_area.top) {
            for py in map_area.top..=map_area.bottom() {
                map.put(px as u32, py, palette::GRATICULE);
            }
            let label = text::longitude_label(lon);
            let x = px as i64 - i64::from(typeface.width(&label)) / 2;
            map.label(&typeface, x, i64::from(map_area.bottom() + 1 + PAD), &label);
        }
    }
    map.outline(map_area, palette::BOUNDARY);

    draw_color_bar(&mut map, options.orientation);
    if let Some((min, max)) = &value_labels {
        draw_color_bar_labels(&mut map, &typeface, options.orientation, min, max);
    }
    draw_title(&mut map, &typeface);

    tracing::debug!(
        parameter = view.name(),
        width = options.width,
        height = options.height,
        orientation = %options.orientation,
        "rendered map"
    );
    Ok(map)
}

fn draw_color_bar(map: &mut RenderedMap, orientation: ColorBarOrientation) {
    let area = map.color_bar_area;
    for py in area.top..=area.bottom() {
        for px in area.left..=area.right() {
            // minimum at the left or bottom end
            let t = match orientation {
                ColorBarOrientation::Horizontal => {
                    (px - area.left) as f32 / (area.width - 1).max(1) as f32
                }
                ColorBarOrientation::Vertical => {
                    (area.bottom() - py) as f32 / (area.height - 1).max(1) as f32
                }
            };
            map.put(px, py, palette::jet(t));
        }
    }
    map.outline(area, palette::BOUNDARY);
}

fn draw_color_bar_labels(
    map: &mut RenderedMap,
    typeface: &Typeface,
    orientation: ColorBarOrientation,
    min: &str,
    max: &str,
) {
    let area = map.color_bar_area;
    let line = i64::from(typeface.line_height());
    match orientation {
        ColorBarOrientation::Horizontal => {
            let y = i64::from(area.bottom() + 1 + PAD);
            map.label(typeface, i64::from(area.left), y, min);
            let x = i64::from(area.right() + 1) - i64::from(typeface.width(max));
            map.label(typeface, x, y, max);
        }
        ColorBarOrientation::Vertical => {
            let x = i64::from(area.right() + 1 + PAD);
            map.label(typeface, x, i64::from(area.top), max);
            map.label(typeface, x, i64::from(area.bottom() + 1) - line, min);
        }
    }
}

fn draw_title(map: &mut RenderedMap, typeface: &Typeface) {
    let area = map.title_area;
    let title = map.title.clone();
    let free = i64::from(area.width) - i64::from(typeface.width(&title));
    let x = i64::from(area.left) + free.max(0) / 2;
    map.label(typeface, x, i64::from(area.top), &title);
}
