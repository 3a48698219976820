use geo::{Coord, Rect};
use shrinkwraprs::Shrinkwrap;

use crate::{
    components::transforms::GeoTransform, crs_geo::CrsGeometry, errors::Result,
};

/// Bounds of a raster in 'geospace', expressed in its crs.
#[derive(Shrinkwrap, Clone, Debug, PartialEq)]
pub struct GeoBounds(CrsGeometry<Rect>);

impl From<CrsGeometry<Rect>> for GeoBounds {
    fn from(value: CrsGeometry<Rect>) -> Self {
        Self(value)
    }
}

impl GeoBounds {
    /// Envelope of the four raster corners.
    ///
    /// `size` is (width, height) in pixels.
    pub fn new(crs: &str, transform: &GeoTransform, size: (usize, usize)) -> Self {
        let (width, height) = crate::tuple_to::<f64, usize>(size);
        let corners = [(0., 0.), (width, 0.), (width, height), (0., height)]
            .map(|(col, row)| transform.pixel_to_world(col, row));
        let min = corners.iter().fold(corners[0], |min, c| Coord {
            x: min.x.min(c.x),
            y: min.y.min(c.y),
        });
        let max = corners.iter().fold(corners[0], |max, c| Coord {
            x: max.x.max(c.x),
            y: max.y.max(c.y),
        });
        Self(CrsGeometry::new(crs, Rect::new(min, max)))
    }

    pub fn left(&self) -> f64 {
        self.0.min().x
    }

    pub fn bottom(&self) -> f64 {
        self.0.min().y
    }

    pub fn right(&self) -> f64 {
        self.0.max().x
    }

    pub fn top(&self) -> f64 {
        self.0.max().y
    }

    /// `[left, bottom, right, top]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.left(), self.bottom(), self.right(), self.top()]
    }

    pub fn center(&self) -> Coord {
        self.0.center()
    }

    pub fn with_crs(self, crs: &str) -> Result<Self> {
        Ok(Self(self.0.with_crs(crs)?))
    }
}
