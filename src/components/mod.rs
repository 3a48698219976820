pub mod backends;
pub mod band;
pub mod bounds;
pub mod file;
pub mod metadata;
pub mod reader;
pub mod transforms;

pub use backends::gdal_backend::GdalFile;
pub use band::{BandInfo, BandStats, Nodata};
pub use bounds::GeoBounds;
pub use file::File;
pub use metadata::{Metadata, Tags};
pub use reader::BandReader;
pub use transforms::GeoTransform;
