use serde::Serialize;
use std::collections::BTreeMap;

use crate::components::{band::serialize_nodata, transforms::GeoTransform};

/// Key, value pairs of a single metadata namespace.
pub type Tags = BTreeMap<String, String>;

/// Summary of a dataset, as printed by `info --meta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub driver: String,
    pub dtype: String,
    #[serde(serialize_with = "serialize_nodata")]
    pub nodata: Option<f64>,
    pub width: usize,
    pub height: usize,
    pub count: usize,
    pub crs: String,
    pub transform: GeoTransform,
}

/// Parses `KEY=VALUE` entries the way gdal lists a metadata domain.
///
/// Entries without a `=` are kept as keys with an empty value.
pub fn parse_tags<I, S>(entries: I) -> Tags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| match entry.as_ref().split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (entry.as_ref().to_string(), String::new()),
        })
        .collect()
}
