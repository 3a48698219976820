use geo::{AffineTransform, Coord};
use serde::{Serialize, Serializer};
use shrinkwraprs::Shrinkwrap;

use crate::errors::{Result, RioError};

/// Pixel to world transform of a dataset.
///
/// Coefficients follow `x' = a*col + b*row + c`, `y' = d*col + e*row + f`.
#[derive(Shrinkwrap, Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(AffineTransform);

impl GeoTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self(AffineTransform::new(a, b, c, d, e, f))
    }

    /// Builds from the gdal coefficient order `[c, a, b, f, d, e]`.
    pub fn from_gdal(gdal_transform: [f64; 6]) -> Self {
        Self::new(
            gdal_transform[1],
            gdal_transform[2],
            gdal_transform[0],
            gdal_transform[4],
            gdal_transform[5],
            gdal_transform[3],
        )
    }

    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.xoff(),
            self.a(),
            self.b(),
            self.yoff(),
            self.d(),
            self.e(),
        ]
    }

    /// `[a, b, c, d, e, f]`
    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.a(),
            self.b(),
            self.xoff(),
            self.d(),
            self.e(),
            self.yoff(),
        ]
    }

    /// (x, y) size of a pixel, always positive.
    pub fn resolution(&self) -> (f64, f64) {
        (
            self.a().hypot(self.d()),
            self.b().hypot(self.e()),
        )
    }

    pub fn pixel_to_world(&self, col: f64, row: f64) -> Coord {
        self.apply(Coord { x: col, y: row })
    }

    pub fn inverse(&self) -> Result<GeoTransform> {
        self.0.inverse().map(Self).ok_or(RioError::NotInvertible)
    }

    /// Fractional (col, row) of a world coordinate.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> Result<Coord> {
        Ok(self.inverse()?.apply(Coord { x, y }))
    }
}

impl Serialize for GeoTransform {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.coefficients().serialize(serializer)
    }
}
