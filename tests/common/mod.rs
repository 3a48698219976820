use gdal::{spatial_ref::SpatialRef, DriverManager, Metadata};
use std::path::{Path, PathBuf};

/// Single band 3x2 `u8` GeoTIFF in EPSG:32633 at 10m resolution.
pub fn write_raster(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<u8, _>(&path, 3, 2, 1)
        .unwrap();
    dataset
        .set_geo_transform(&[500000., 10., 0., 4600000., 0., -10.])
        .unwrap();
    dataset
        .set_spatial_ref(&SpatialRef::from_epsg(32633).unwrap())
        .unwrap();
    dataset.set_metadata_item("SENSOR", "cli", "").unwrap();
    path
}
