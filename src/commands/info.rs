//! Info command
//!
//! Usage: rio info <INPUT> [--meta | --tags | --count | ...]

use clap::Args;
use itertools::Itertools;
use log::info;
use std::{io::Write, path::PathBuf};

use crate::{
    commands::write_json,
    components::{File, GdalFile, Nodata},
    crs_geo::{CrsGeometry, WGS84},
    errors::{Result, RioError},
};

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Input raster dataset
    pub input: PathBuf,

    /// Show the dataset metadata (default)
    #[arg(long, group = "item")]
    pub meta: bool,

    /// Show the tags of a namespace
    #[arg(long, group = "item")]
    pub tags: bool,

    /// List the available tag namespaces
    #[arg(long, group = "item")]
    pub namespaces: bool,

    /// Tag namespace, the default namespace when omitted
    #[arg(long, value_name = "NS", default_value = "")]
    pub namespace: String,

    /// Band index (1-based) for tags, namespaces, dtype and nodata
    #[arg(long, value_name = "BIDX")]
    pub bidx: Option<usize>,

    /// Print the band count
    #[arg(long, group = "item")]
    pub count: bool,

    /// Print the data type
    #[arg(long, group = "item")]
    pub dtype: bool,

    /// Print the nodata value
    #[arg(long, group = "item")]
    pub nodata: bool,

    /// Print the shape as height and width
    #[arg(long, group = "item")]
    pub shape: bool,

    /// Print the coordinate reference system
    #[arg(long, group = "item")]
    pub crs: bool,

    /// Print the bounds as left bottom right top
    #[arg(long, group = "item")]
    pub bounds: bool,

    /// Print the pixel size
    #[arg(long, group = "item")]
    pub res: bool,

    /// Print the longitude and latitude of the dataset center
    #[arg(long, group = "item")]
    pub lnglat: bool,

    /// JSON indentation
    #[arg(long, default_value_t = 2)]
    pub indent: usize,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// What `info` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Meta,
    Tags,
    Namespaces,
    Count,
    Dtype,
    Nodata,
    Shape,
    Crs,
    Bounds,
    Res,
    LngLat,
}

impl InfoArgs {
    pub fn item(&self) -> Item {
        [
            (self.tags, Item::Tags),
            (self.namespaces, Item::Namespaces),
            (self.count, Item::Count),
            (self.dtype, Item::Dtype),
            (self.nodata, Item::Nodata),
            (self.shape, Item::Shape),
            (self.crs, Item::Crs),
            (self.bounds, Item::Bounds),
            (self.res, Item::Res),
            (self.lnglat, Item::LngLat),
        ]
        .into_iter()
        .find_map(|(selected, item)| selected.then_some(item))
        .unwrap_or(Item::Meta)
    }

    fn indent(&self) -> Option<usize> {
        (!self.compact).then_some(self.indent)
    }
}

/// Execute info command
pub fn execute<W: Write>(args: InfoArgs, out: &mut W) -> Result<()> {
    let file = GdalFile::open(&args.input)?;
    report(&file, &args, out)
}

pub fn report<F: File, W: Write>(file: &F, args: &InfoArgs, out: &mut W) -> Result<()> {
    let item = args.item();
    info!("info {:?} of {}", item, file.path().display());
    match item {
        Item::Meta => write_json(out, &file.metadata()?, args.indent())?,
        Item::Tags => write_json(out, &file.tags(&args.namespace, args.bidx)?, args.indent())?,
        Item::Namespaces => {
            for namespace in file.namespaces(args.bidx)? {
                writeln!(out, "{namespace}")?;
            }
        }
        Item::Count => writeln!(out, "{}", file.num_bands())?,
        Item::Dtype => writeln!(out, "{}", file.band_info(args.bidx.unwrap_or(1))?.dtype)?,
        Item::Nodata => {
            let nodata = file.band_info(args.bidx.unwrap_or(1))?.nodata;
            write_json(out, &Nodata(nodata), None)?
        }
        Item::Shape => {
            let (width, height) = file.size();
            writeln!(out, "{height} {width}")?
        }
        Item::Crs => writeln!(out, "{}", file.crs())?,
        Item::Bounds => writeln!(out, "{}", file.geo_bounds()?.to_array().iter().join(" "))?,
        Item::Res => {
            let (xres, yres) = file.transform()?.resolution();
            writeln!(out, "{xres} {yres}")?
        }
        Item::LngLat => {
            let bounds = file.geo_bounds()?;
            if bounds.crs().is_empty() {
                return Err(RioError::MissingCrs(file.path().display().to_string()));
            }
            let center = bounds.center();
            let lnglat = CrsGeometry::new(bounds.crs(), geo::Rect::new(center, center))
                .with_crs(WGS84)?
                .min();
            writeln!(out, "{} {}", lnglat.x, lnglat.y)?
        }
    }
    Ok(())
}
