use std::path::{Path, PathBuf};

use crate::{
    components::{
        band::{BandInfo, BandStats},
        metadata::{parse_tags, Tags},
        reader::{strip_stats, BandReader},
        transforms::GeoTransform,
        File,
    },
    errors::{Result, RioError},
};

/// Implementations for gdal
pub mod gdal_backend {
    use super::*;
    use gdal::{
        raster::RasterBand, spatial_ref::SpatialRef, Dataset as GdalDataset, DatasetOptions,
        GdalOpenFlags, Metadata as GdalMetadata,
    };
    use log::{info, warn};

    /// Identity transform gdal reports for datasets without georeferencing.
    const DEFAULT_GDAL_TRANSFORM: [f64; 6] = [0., 1., 0., 0., 0., 1.];

    fn tags_gdal(metadata: &impl GdalMetadata, namespace: &str) -> Tags {
        GdalMetadata::metadata_domain(metadata, namespace)
            .map(parse_tags)
            .unwrap_or_default()
    }

    fn namespaces_gdal(metadata: &impl GdalMetadata) -> Vec<String> {
        let mut namespaces = GdalMetadata::metadata_domains(metadata);
        namespaces.sort();
        namespaces
    }

    /// `AUTHORITY:CODE` when the crs carries an authority, its WKT otherwise.
    fn crs_gdal(spatial_ref: &SpatialRef) -> Result<String> {
        match (spatial_ref.auth_name(), spatial_ref.auth_code()) {
            (Some(name), Ok(code)) => Ok(format!("{name}:{code}")),
            _ => Ok(spatial_ref.to_wkt()?),
        }
    }

    fn band_info_gdal(index: usize, raster_band: &RasterBand) -> Result<BandInfo> {
        Ok(BandInfo {
            index,
            dtype: raster_band.band_type().name(),
            nodata: raster_band.no_data_value(),
            description: GdalMetadata::description(raster_band)?,
            color_interp: raster_band.color_interpretation().name(),
            block_size: raster_band.block_size(),
            scale: raster_band.scale(),
            offset: raster_band.offset(),
            unit: raster_band.unit(),
        })
    }

    #[derive(Debug)]
    pub struct GdalFile {
        path: PathBuf,
        dataset: GdalDataset,
        writable: bool,
    }

    impl GdalFile {
        fn rasterband(&self, index: usize) -> Result<RasterBand<'_>> {
            Ok(self.dataset.rasterband(self.check_band(index)?)?)
        }
    }

    impl File for GdalFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            let file = GdalFile {
                path: path.as_ref().to_path_buf(),
                dataset: GdalDataset::open(&path)?,
                writable: false,
            };
            info!("opened {}", file.path.display());
            Ok(file)
        }
        fn open_update<P: AsRef<Path>>(path: P) -> Result<Self> {
            let options = DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_UPDATE | GdalOpenFlags::GDAL_OF_RASTER,
                ..Default::default()
            };
            let file = GdalFile {
                path: path.as_ref().to_path_buf(),
                dataset: GdalDataset::open_ex(&path, options)?,
                writable: true,
            };
            info!("opened {} in update mode", file.path.display());
            Ok(file)
        }
        fn path(&self) -> &Path {
            &self.path
        }
        fn is_writable(&self) -> bool {
            self.writable
        }
        fn driver(&self) -> String {
            self.dataset.driver().short_name()
        }
        fn size(&self) -> (usize, usize) {
            self.dataset.raster_size()
        }
        fn crs(&self) -> String {
            let Ok(spatial_ref) = self.dataset.spatial_ref() else {
                return String::new();
            };
            crs_gdal(&spatial_ref).unwrap_or_else(|error| {
                warn!("{}: unreadable crs ({error})", self.path.display());
                String::new()
            })
        }
        fn transform(&self) -> Result<GeoTransform> {
            match self.dataset.geo_transform() {
                Ok(gdal_transform) => Ok(GeoTransform::from_gdal(gdal_transform)),
                Err(error) => {
                    warn!(
                        "{} is not georeferenced ({error}), using the identity transform",
                        self.path.display()
                    );
                    Ok(GeoTransform::from_gdal(DEFAULT_GDAL_TRANSFORM))
                }
            }
        }
        fn num_bands(&self) -> usize {
            self.dataset.raster_count()
        }
        fn band_info(&self, index: usize) -> Result<BandInfo> {
            band_info_gdal(index, &self.rasterband(index)?)
        }
        fn band_reader(&self, index: usize) -> Result<Box<dyn BandReader>> {
            let raster_band = self.rasterband(index)?;
            Ok(Box::new(GdalReader {
                path: self.path.clone(),
                index,
                size: raster_band.size(),
                block_size: raster_band.block_size(),
                nodata: raster_band.no_data_value(),
            }))
        }
        fn namespaces(&self, band: Option<usize>) -> Result<Vec<String>> {
            match band {
                Some(index) => Ok(namespaces_gdal(&self.rasterband(index)?)),
                None => Ok(namespaces_gdal(&self.dataset)),
            }
        }
        fn tags(&self, namespace: &str, band: Option<usize>) -> Result<Tags> {
            match band {
                Some(index) => Ok(tags_gdal(&self.rasterband(index)?, namespace)),
                None => Ok(tags_gdal(&self.dataset, namespace)),
            }
        }
        fn set_tag(&mut self, key: &str, value: &str, namespace: &str) -> Result<()> {
            if !self.writable {
                return Err(RioError::ReadOnly);
            }
            self.dataset.set_metadata_item(key, value, namespace)?;
            info!("set {key}={value} in namespace {namespace:?}");
            Ok(())
        }
    }

    /// Reads a band by reopening the dataset at `path`.
    #[derive(Debug)]
    struct GdalReader {
        path: PathBuf,
        index: usize,
        size: (usize, usize),
        block_size: (usize, usize),
        nodata: Option<f64>,
    }

    impl BandReader for GdalReader {
        fn index(&self) -> usize {
            self.index
        }
        fn size(&self) -> (usize, usize) {
            self.size
        }
        fn nodata(&self) -> Option<f64> {
            self.nodata
        }
        fn block_size(&self) -> (usize, usize) {
            self.block_size
        }
        fn read_window(&self, offset: (usize, usize), size: (usize, usize)) -> Result<Vec<f64>> {
            let dataset = GdalDataset::open(&self.path)?;
            let rasterband = dataset.rasterband(self.index)?;
            let buffer = rasterband.read_as::<f64>(
                crate::tuple_to::<isize, usize>(offset),
                size,
                size,
                None,
            )?;
            Ok(buffer.data().to_vec())
        }
        /// Keeps one handle open for all strips of the band.
        fn stats(&self) -> Result<BandStats> {
            let dataset = GdalDataset::open(&self.path)?;
            let rasterband = dataset.rasterband(self.index)?;
            strip_stats(self.size, self.block_size.1, self.nodata, |offset, size| {
                let buffer = rasterband.read_as::<f64>(
                    crate::tuple_to::<isize, usize>(offset),
                    size,
                    size,
                    None,
                )?;
                Ok(buffer.data().to_vec())
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::{test_utils::*, Indexes};
        use rstest::rstest;

        #[rstest]
        fn reads_dataset_properties() {
            let (_dir, path) = temp_raster();
            let file = GdalFile::open(&path).unwrap();
            assert_eq!(file.driver(), "GTiff");
            assert_eq!(file.size(), (WIDTH, HEIGHT));
            assert_eq!(file.num_bands(), 2);
            assert_eq!(file.crs(), "EPSG:32633");
            assert_eq!(file.transform().unwrap().to_gdal(), GEO_TRANSFORM);
            assert!(!file.is_writable());
        }

        #[rstest]
        fn band_info_of_each_band() {
            let (_dir, path) = temp_raster();
            let file = GdalFile::open(&path).unwrap();
            let bands = file.bands(&Indexes::all()).unwrap();
            assert_eq!(bands.len(), 2);
            assert_eq!(bands[0].index, 1);
            assert_eq!(bands[0].dtype, "Byte");
            assert_eq!(bands[0].nodata, Some(NODATA));
            assert_eq!(bands[1].nodata, None);
        }

        #[rstest]
        fn reader_reads_windows() {
            let (_dir, path) = temp_raster();
            let file = GdalFile::open(&path).unwrap();
            let reader = file.band_reader(2).unwrap();
            assert_eq!(reader.size(), (WIDTH, HEIGHT));
            assert_eq!(
                reader.read_window((1, 1), (2, 2)).unwrap(),
                vec![10., 12., 18., 20.]
            );
            assert_eq!(reader.read_pixel((3, 2)).unwrap(), 22.);
        }

        #[rstest]
        fn unknown_namespace_has_no_tags() {
            let (_dir, path) = temp_raster();
            let file = GdalFile::open(&path).unwrap();
            assert!(file.tags("NOPE", None).unwrap().is_empty());
            assert_eq!(file.tags("PROCESSING", None).unwrap()["CLOUD_COVER"], "12");
        }

        #[rstest]
        fn read_only_file_rejects_tags() {
            let (_dir, path) = temp_raster();
            let mut file = GdalFile::open(&path).unwrap();
            assert!(matches!(
                file.set_tag("A", "b", ""),
                Err(RioError::ReadOnly)
            ));
        }

        #[rstest]
        fn plain_raster_defaults() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = write_plain_raster(dir.path(), "plain.tif");
            let file = GdalFile::open(&path).unwrap();
            assert_eq!(file.crs(), "");
            assert_eq!(file.geo_bounds().unwrap().to_array(), [0., 0., 2., 2.]);
        }

        #[rstest]
        fn crs_without_authority_is_wkt() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = write_plain_raster(dir.path(), "merc.tif");
            {
                let mut dataset = GdalDataset::open_ex(
                    &path,
                    DatasetOptions {
                        open_flags: GdalOpenFlags::GDAL_OF_UPDATE,
                        ..Default::default()
                    },
                )
                .unwrap();
                let merc = SpatialRef::from_proj4("+proj=merc +lon_0=5 +datum=WGS84").unwrap();
                dataset.set_spatial_ref(&merc).unwrap();
            }
            let crs = GdalFile::open(&path).unwrap().crs();
            assert!(!crs.starts_with("EPSG:"), "{crs}");
            assert!(crs.contains("Mercator"), "{crs}");
        }

        #[rstest]
        fn stats_of_float_band_with_nan_nodata() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = write_float_raster(dir.path(), "float.tif");
            let file = GdalFile::open(&path).unwrap();
            assert!(file.band_info(1).unwrap().nodata.unwrap().is_nan());
            let stats = file.band_reader(1).unwrap().stats().unwrap();
            assert_eq!(stats.count, 3);
            assert_eq!(stats.min, Some(1.5));
            assert_eq!(stats.max, Some(3.5));
        }
    }
}
