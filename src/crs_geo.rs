use std::rc::Rc;

use geo::{Coord, Rect};
use itertools::Itertools;
use log::debug;
use proj::Proj;
use shrinkwraprs::Shrinkwrap;

use crate::errors::Result;

/// Number of points sampled along each edge of a rectangle when reprojecting.
pub const DENSIFY_PTS: usize = 21;

pub const WGS84: &str = "EPSG:4326";

/// A geometry together with the crs its coordinates are expressed in.
#[derive(Shrinkwrap, Debug, Clone, PartialEq)]
pub struct CrsGeometry<G> {
    crs: Rc<str>,
    #[shrinkwrap(main_field)]
    geometry: G,
}

impl<G> CrsGeometry<G> {
    pub fn new(crs: impl Into<Rc<str>>, geometry: G) -> Self {
        Self {
            crs: crs.into(),
            geometry,
        }
    }

    pub fn crs(&self) -> &str {
        self.crs.as_ref()
    }
}

impl CrsGeometry<Rect> {
    /// Reprojects into `crs`, returning the envelope of the densified edges.
    ///
    /// Same crs is a no-op.
    pub fn with_crs(self, crs: &str) -> Result<Self> {
        if self.crs().eq(crs) {
            return Ok(self);
        }
        debug!("reprojecting {:?} from {} to {}", self.geometry, self.crs(), crs);
        let proj = Proj::new_known_crs(self.crs(), crs, None)?;
        let geometry = densify(&self.geometry, DENSIFY_PTS)
            .into_iter()
            .map(|coord| proj.convert((coord.x, coord.y)))
            .process_results(|coords| envelope(coords.map(|(x, y)| Coord { x, y })))?;
        Ok(Self {
            crs: Rc::from(crs),
            geometry,
        })
    }
}

/// Points along the boundary of `rect`, `pts` per edge, corners included once.
pub(crate) fn densify(rect: &Rect, pts: usize) -> Vec<Coord> {
    let pts = pts.max(2);
    let (min, max) = (rect.min(), rect.max());
    let steps = (pts - 1) as f64;
    let lerp = |from: f64, to: f64, i: usize| from + (to - from) * (i as f64) / steps;
    let mut coords = Vec::with_capacity(4 * (pts - 1));
    for i in 0..pts - 1 {
        coords.push(Coord { x: lerp(min.x, max.x, i), y: min.y });
    }
    for i in 0..pts - 1 {
        coords.push(Coord { x: max.x, y: lerp(min.y, max.y, i) });
    }
    for i in 0..pts - 1 {
        coords.push(Coord { x: lerp(max.x, min.x, i), y: max.y });
    }
    for i in 0..pts - 1 {
        coords.push(Coord { x: min.x, y: lerp(max.y, min.y, i) });
    }
    coords
}

fn envelope(coords: impl Iterator<Item = Coord>) -> Rect {
    let (min, max) = coords.fold(
        (
            Coord { x: f64::INFINITY, y: f64::INFINITY },
            Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY },
        ),
        |(min, max), coord| {
            (
                Coord { x: min.x.min(coord.x), y: min.y.min(coord.y) },
                Coord { x: max.x.max(coord.x), y: max.y.max(coord.y) },
            )
        },
    );
    Rect::new(min, max)
}
