use log::{info, warn};
use std::{fmt::Debug, path::Path};

use crate::{
    components::{
        band::BandInfo,
        bounds::GeoBounds,
        metadata::{Metadata, Tags},
        reader::BandReader,
        transforms::GeoTransform,
    },
    errors::{Result, RioError},
    Indexes,
};

/// An open raster dataset.
///
/// Band indexes are 1-based throughout.
pub trait File: Debug + Sized {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn open_update<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn path(&self) -> &Path;
    fn is_writable(&self) -> bool;
    fn driver(&self) -> String;
    /// (width, height)
    fn size(&self) -> (usize, usize);
    fn crs(&self) -> String;
    fn transform(&self) -> Result<GeoTransform>;
    fn num_bands(&self) -> usize;
    fn band_info(&self, index: usize) -> Result<BandInfo>;
    fn band_reader(&self, index: usize) -> Result<Box<dyn BandReader>>;
    /// Namespaces of the dataset, or of band `band`.
    fn namespaces(&self, band: Option<usize>) -> Result<Vec<String>>;
    /// Tags of `namespace` of the dataset, or of band `band`.
    fn tags(&self, namespace: &str, band: Option<usize>) -> Result<Tags>;
    fn set_tag(&mut self, key: &str, value: &str, namespace: &str) -> Result<()>;

    fn check_band(&self, index: usize) -> Result<usize> {
        let count = self.num_bands();
        if index == 0 || index > count {
            return Err(RioError::BandOutOfRange { index, count });
        }
        Ok(index)
    }

    fn bands(&self, indexes: &Indexes) -> Result<Vec<BandInfo>> {
        indexes
            .indexes_from(self.num_bands())?
            .iter()
            .map(|index| self.band_info(*index))
            .collect()
    }

    fn band_readers(&self, indexes: &Indexes) -> Result<Vec<Box<dyn BandReader>>> {
        indexes
            .indexes_from(self.num_bands())?
            .iter()
            .map(|index| self.band_reader(*index))
            .collect()
    }

    fn geo_bounds(&self) -> Result<GeoBounds> {
        Ok(GeoBounds::new(
            self.crs().as_str(),
            &self.transform()?,
            self.size(),
        ))
    }

    /// Summary of the dataset; dtype and nodata are the ones of the first band.
    fn metadata(&self) -> Result<Metadata> {
        let (width, height) = self.size();
        let count = self.num_bands();
        let (dtype, nodata) = match count {
            0 => {
                warn!("{} has no bands", self.path().display());
                (String::new(), None)
            }
            _ => {
                let first = self.band_info(1)?;
                (first.dtype, first.nodata)
            }
        };
        let metadata = Metadata {
            driver: self.driver(),
            dtype,
            nodata,
            width,
            height,
            count,
            crs: self.crs(),
            transform: self.transform()?,
        };
        info!("read {metadata:?}");
        Ok(metadata)
    }
}
