use gdal::{spatial_ref::SpatialRef, DriverManager, Metadata as GdalMetadata};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WIDTH: usize = 4;
pub const HEIGHT: usize = 3;
pub const NODATA: f64 = 255.;
/// UTM 33N, 10m pixels.
pub const GEO_TRANSFORM: [f64; 6] = [500000., 10., 0., 4600000., 0., -10.];

/// Two band `u8` GeoTIFF in EPSG:32633 with tags in the default and `PROCESSING` namespaces.
///
/// Band `b` holds `b * (col + row * WIDTH)`, band 1 pixel (0, 0) is nodata.
pub fn write_raster(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<u8, _>(&path, WIDTH, HEIGHT, 2)
        .unwrap();
    dataset.set_geo_transform(&GEO_TRANSFORM).unwrap();
    dataset
        .set_spatial_ref(&SpatialRef::from_epsg(32633).unwrap())
        .unwrap();
    dataset.set_metadata_item("SENSOR", "test", "").unwrap();
    dataset.set_metadata_item("CLOUD_COVER", "12", "PROCESSING").unwrap();
    for band_index in 1..=2usize {
        let mut band = dataset.rasterband(band_index).unwrap();
        let mut data: Vec<u8> = (0..WIDTH * HEIGHT)
            .map(|pixel| (pixel * band_index) as u8)
            .collect();
        if band_index == 1 {
            data[0] = NODATA as u8;
            band.set_no_data_value(Some(NODATA)).unwrap();
        }
        let mut buffer = gdal::raster::Buffer::new((WIDTH, HEIGHT), data);
        band.write((0, 0), (WIDTH, HEIGHT), &mut buffer).unwrap();
        band.set_metadata_item("NAME", &format!("band{band_index}"), "")
            .unwrap();
    }
    path
}

/// Single band GeoTIFF without crs nor geotransform.
pub fn write_plain_raster(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    driver
        .create_with_band_type::<u8, _>(&path, 2, 2, 1)
        .unwrap();
    path
}

/// Single band `f32` GeoTIFF in EPSG:4326 with NaN nodata.
///
/// Pixels are `[NaN, 1.5, 2.5, 3.5]`.
pub fn write_float_raster(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<f32, _>(&path, 2, 2, 1)
        .unwrap();
    dataset
        .set_geo_transform(&[10., 0.5, 0., 50., 0., -0.5])
        .unwrap();
    dataset
        .set_spatial_ref(&SpatialRef::from_epsg(4326).unwrap())
        .unwrap();
    let mut band = dataset.rasterband(1).unwrap();
    band.set_no_data_value(Some(f64::NAN)).unwrap();
    let mut buffer = gdal::raster::Buffer::new((2, 2), vec![f32::NAN, 1.5, 2.5, 3.5]);
    band.write((0, 0), (2, 2), &mut buffer).unwrap();
    path
}

pub fn temp_raster() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = write_raster(dir.path(), "raster.tif");
    (dir, path)
}
