//! Bounds command
//!
//! Usage: rio bounds <INPUT>... [--geographic | --projected | --dst-crs <CRS>]

use clap::Args;
use log::{debug, info};
use std::{collections::BTreeMap, io::Write, path::PathBuf};

use crate::{
    commands::write_json,
    components::{File, GdalFile, GeoBounds},
    crs_geo::WGS84,
    errors::{Result, RioError},
    geojson::{Feature, FeatureCollection, MAX_PRECISION},
};

#[derive(Debug, Args)]
pub struct BoundsArgs {
    /// Input raster datasets
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Decimal precision of coordinates
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64))]
    pub precision: Option<u32>,

    /// JSON indentation, single line when omitted
    #[arg(long)]
    pub indent: Option<usize>,

    /// Force single line output, overriding --indent
    #[arg(long)]
    pub compact: bool,

    /// Output in longitude and latitude (default)
    #[arg(long, group = "target")]
    pub geographic: bool,

    /// Output in the dataset crs
    #[arg(long, group = "target")]
    pub projected: bool,

    /// Output in the given crs
    #[arg(long, group = "target", value_name = "CRS")]
    pub dst_crs: Option<String>,

    /// Write one feature per line instead of a collection
    #[arg(long, group = "layout")]
    pub sequence: bool,

    /// Write only the bounding boxes, one per line
    #[arg(long, group = "layout")]
    pub bbox: bool,
}

impl BoundsArgs {
    /// Crs to reproject to, `None` keeps the dataset crs.
    pub fn target_crs(&self) -> Option<&str> {
        match (&self.dst_crs, self.projected) {
            (Some(crs), _) => Some(crs.as_str()),
            (None, true) => None,
            (None, false) => Some(WGS84),
        }
    }

    fn indent(&self) -> Option<usize> {
        self.indent.filter(|_| !self.compact)
    }
}

/// Bounds of `file`, reprojected into `target_crs` when given.
pub fn file_bounds<F: File>(file: &F, target_crs: Option<&str>) -> Result<GeoBounds> {
    let bounds = file.geo_bounds()?;
    match target_crs {
        None => Ok(bounds),
        Some(_) if bounds.crs().is_empty() => {
            Err(RioError::MissingCrs(file.path().display().to_string()))
        }
        Some(crs) => bounds.with_crs(crs),
    }
}

/// Feature of one dataset, `id` is its position on the command line.
pub fn feature<F: File>(file: &F, id: usize, args: &BoundsArgs) -> Result<Feature> {
    let bounds = file_bounds(file, args.target_crs())?;
    debug!("bounds of {}: {:?}", file.path().display(), bounds);
    let properties = BTreeMap::from([
        ("id".to_string(), id.to_string()),
        ("title".to_string(), file.path().display().to_string()),
    ]);
    Ok(Feature::from_bounds(&bounds, args.precision, properties))
}

/// Execute bounds command
pub fn execute<W: Write>(args: BoundsArgs, out: &mut W) -> Result<()> {
    let mut features = Vec::with_capacity(args.inputs.len());
    for (id, input) in args.inputs.iter().enumerate() {
        let file = GdalFile::open(input)?;
        let feature = feature(&file, id, &args)?;
        if args.sequence {
            write_json(out, &feature, args.indent())?;
        } else if args.bbox {
            write_json(out, &feature.bbox, None)?;
        } else {
            features.push(feature);
        }
    }
    if !(args.sequence || args.bbox) {
        info!("writing collection of {} feature(s)", features.len());
        write_json(out, &FeatureCollection::new(features), args.indent())?;
    }
    Ok(())
}
