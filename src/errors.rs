pub type Result<T> = std::result::Result<T, RioError>;

#[derive(thiserror::Error, Debug)]
pub enum RioError {
    #[error(transparent)]
    ProjError(#[from] proj::ProjError),
    #[error(transparent)]
    ProjCreateError(#[from] proj::ProjCreateError),
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Band index {index} is out of range, dataset has {count} band(s)")]
    BandOutOfRange { index: usize, count: usize },
    #[error("Dataset {0} has no coordinate reference system")]
    MissingCrs(String),
    #[error("Dataset was opened read-only, reopen it with mode r+")]
    ReadOnly,
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Geotransform is not invertible")]
    NotInvertible,
}
