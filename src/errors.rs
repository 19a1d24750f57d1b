use std::path::PathBuf;

use gdal::errors::GdalError;

use crate::components::PixelType;

pub type Result<T> = std::result::Result<T, RastergridError>;

#[derive(thiserror::Error, Debug)]
pub enum RastergridError {
    #[error("Could not open dataset {path:?}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error("Pixel type code {code} is not supported")]
    UnsupportedType { code: u32 },
    #[error("Band has pixel type {found}, raster element type is {expected}")]
    TypeMismatch {
        expected: PixelType,
        found: PixelType,
    },
    #[error("Could not read band {band_index} of {path:?}")]
    ReadFailed {
        path: PathBuf,
        band_index: usize,
        #[source]
        source: GdalError,
    },
    #[error("Driver {0} is not registered")]
    DriverNotFound(String),
    #[error("Driver {driver} does not support {operation}. {hint}")]
    UnsupportedOperation {
        driver: String,
        operation: &'static str,
        hint: &'static str,
    },
    #[error("Driver {driver} could not create {path:?}")]
    CreateFailed {
        driver: String,
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error("Could not set geotransform of {path:?}")]
    SetTransformFailed {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error("Could not set spatial reference of {path:?}")]
    SetProjectionFailed {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error("Could not write pixels to {path:?}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error(transparent)]
    NdarrayError(#[from] ndarray::ShapeError),
}
