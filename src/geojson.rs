//! Minimal GeoJSON types for bounds output.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::GeoBounds;

pub type Position = [f64; 2];
pub type BBox = [f64; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub bbox: BBox,
    pub geometry: Geometry,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    pub features: Vec<Feature>,
}

/// Most decimals an `f64` coordinate can carry.
pub const MAX_PRECISION: u32 = 17;

/// Rounds to `precision` decimals, `None` keeps the value.
///
/// Precisions beyond what an `f64` holds keep the value too.
pub fn round(value: f64, precision: Option<u32>) -> f64 {
    let Some(precision) = precision.filter(|precision| *precision <= MAX_PRECISION) else {
        return value;
    };
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

impl Feature {
    /// Closed polygon ring of `bounds`, starting at the lower left corner.
    pub fn from_bounds(
        bounds: &GeoBounds,
        precision: Option<u32>,
        properties: BTreeMap<String, String>,
    ) -> Self {
        let [left, bottom, right, top] = bounds.to_array().map(|v| round(v, precision));
        let ring = vec![
            [left, bottom],
            [right, bottom],
            [right, top],
            [left, top],
            [left, bottom],
        ];
        Self {
            bbox: [left, bottom, right, top],
            geometry: Geometry::Polygon {
                coordinates: vec![ring],
            },
            properties,
        }
    }
}

impl FeatureCollection {
    /// The collection bbox is the union of the feature bboxes.
    pub fn new(features: Vec<Feature>) -> Self {
        let bbox = features.iter().map(|feature| feature.bbox).reduce(|a, b| {
            [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]
        });
        Self { bbox, features }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs_geo::CrsGeometry;
    use geo::Rect;
    use rstest::rstest;
    use serde_json::json;

    fn bounds(min: (f64, f64), max: (f64, f64)) -> GeoBounds {
        GeoBounds::from(CrsGeometry::new("EPSG:4326", Rect::new(min, max)))
    }

    #[rstest]
    #[case(1.23456, Some(2), 1.23)]
    #[case(-1.235, Some(0), -1.)]
    #[case(1.23456, None, 1.23456)]
    #[case(4599970.25, Some(2), 4599970.25)]
    #[case(4599970.25, Some(310), 4599970.25)]
    #[case(500000., Some(3_000_000_000), 500000.)]
    #[case(1e300, Some(17), 1e300)]
    fn rounds_to_precision(#[case] value: f64, #[case] precision: Option<u32>, #[case] expected: f64) {
        assert_eq!(round(value, precision), expected);
    }

    #[rstest]
    fn feature_is_a_closed_polygon() {
        let feature = Feature::from_bounds(
            &bounds((0., 1.), (2., 3.)),
            None,
            BTreeMap::from([("id".to_string(), "0".to_string())]),
        );
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "bbox": [0., 1., 2., 3.],
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0., 1.], [2., 1.], [2., 3.], [0., 3.], [0., 1.]]]
                },
                "properties": {"id": "0"}
            })
        );
    }

    #[rstest]
    fn collection_bbox_is_the_union() {
        let features = vec![
            Feature::from_bounds(&bounds((0., 0.), (1., 1.)), None, BTreeMap::new()),
            Feature::from_bounds(&bounds((-2., 0.5), (0.5, 4.)), None, BTreeMap::new()),
        ];
        let collection = FeatureCollection::new(features);
        assert_eq!(collection.bbox, Some([-2., 0., 1., 4.]));
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 2);
    }

    #[rstest]
    fn empty_collection_has_no_bbox() {
        let collection = FeatureCollection::new(Vec::new());
        assert_eq!(collection.bbox, None);
        let value = serde_json::to_value(&collection).unwrap();
        assert!(value.get("bbox").is_none());
    }
}
