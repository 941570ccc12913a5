//! Miller cylindrical projection.

use std::f64::consts::FRAC_PI_4;

/// Projects a latitude in degrees onto the Miller y axis.
pub fn miller_y(lat: f64) -> f64 {
    let phi = lat.clamp(-90.0, 90.0).to_radians();
    1.25 * (FRAC_PI_4 + 0.4 * phi).tan().ln()
}

/// Inverse of [`miller_y`], in degrees.
pub fn miller_lat(y: f64) -> f64 {
    (2.5 * (0.8 * y).exp().atan() - 5.0 * FRAC_PI_4 / 2.0).to_degrees()
}

/// Projects a longitude in degrees onto the Miller x axis.
pub fn miller_x(lon: f64) -> f64 {
    lon.to_radians()
}

pub fn miller_lon(x: f64) -> f64 {
    x.to_degrees()
}

/// Linear mapping between a projected rectangle and a pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    pub(crate) fn new(
        (lat_min, lat_max): (f64, f64),
        (lon_min, lon_max): (f64, f64),
        (left, top, width, height): (u32, u32, u32, u32),
    ) -> Self {
        Self {
            x_min: miller_x(lon_min),
            x_max: miller_x(lon_max),
            y_min: miller_y(lat_min),
            y_max: miller_y(lat_max),
            left: f64::from(left),
            top: f64::from(top),
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Returns the latitude and longitude at the centre of a pixel.
    pub(crate) fn to_latlon(&self, px: u32, py: u32) -> (f64, f64) {
        let fx = (f64::from(px) + 0.5 - self.left) / self.width;
        let fy = (f64::from(py) + 0.5 - self.top) / self.height;
        let x = self.x_min + fx * (self.x_max - self.x_min);
        let y = self.y_max - fy * (self.y_max - self.y_min);
        (miller_lat(y), miller_lon(x))
    }

    /// Returns the pixel row of a latitude, north at the top.
    pub(crate) fn row_of(&self, lat: f64) -> f64 {
        let fy = (self.y_max - miller_y(lat)) / (self.y_max - self.y_min);
        self.top + fy * self.height
    }

    pub(crate) fn col_of(&self, lon: f64) -> f64 {
        let fx = (miller_x(lon) - self.x_min) / (self.x_max - self.x_min);
        self.left + fx * self.width
    }
}
