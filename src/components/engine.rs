use gdal::errors::Result as GdalResult;
use std::{fmt::Debug, path::Path};

use crate::components::{DataType, PixelType};

/// Six coefficients of the affine pixel/line to georeferenced mapping,
/// in the engine's order: `[x_origin, x_size, x_rotation, y_origin, y_rotation, y_size]`.
pub type GeoTransform = [f64; 6];

/// What the engine reports when a dataset has no explicit geotransform.
pub const DEFAULT_GEO_TRANSFORM: GeoTransform = [0., 1., 0., 0., 0., 1.];

pub const DCAP_CREATE: &str = "DCAP_CREATE";
pub const DCAP_CREATECOPY: &str = "DCAP_CREATECOPY";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum AccessMode {
    #[default]
    ReadOnly,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct OpenOptions {
    /// 1-based, as the engine numbers bands.
    pub band_index: usize,
    pub access_mode: AccessMode,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            band_index: 1,
            access_mode: AccessMode::ReadOnly,
        }
    }
}

impl OpenOptions {
    pub fn band(band_index: usize) -> Self {
        Self {
            band_index,
            ..Self::default()
        }
    }

    pub fn with_access_mode(mut self, access_mode: AccessMode) -> Self {
        self.access_mode = access_mode;
        self
    }
}

/// Driver specific `KEY=VALUE` creation options, forwarded in order.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CreateOptions(Vec<(String, String)>);

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CreateOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Operations the raster engine exposes.
///
/// Every call blocks until the engine returns. Handles are not assumed
/// reentrant, so nothing here is required to be `Sync`.
pub trait Engine: Clone + Debug {
    /// Released when dropped.
    type Dataset;
    type Driver;

    fn open_dataset(&self, path: &Path, access_mode: AccessMode) -> GdalResult<Self::Dataset>;
    fn raster_size(&self, dataset: &Self::Dataset) -> (usize, usize);
    /// Pixel type code of the 1-based `band_index`.
    fn band_type(&self, dataset: &Self::Dataset, band_index: usize) -> GdalResult<u32>;
    /// Full extent transfer of `band_index` into a line-major `buffer` of `size.0 * size.1`.
    fn read_band<T: DataType>(
        &self,
        dataset: &Self::Dataset,
        band_index: usize,
        size: (usize, usize),
        buffer: &mut [T],
    ) -> GdalResult<()>;
    /// Full extent transfer of a line-major `buffer` into `band_index`.
    fn write_band<T: DataType>(
        &self,
        dataset: &mut Self::Dataset,
        band_index: usize,
        size: (usize, usize),
        buffer: Vec<T>,
    ) -> GdalResult<()>;
    fn geo_transform(&self, dataset: &Self::Dataset) -> GdalResult<GeoTransform>;
    fn set_geo_transform(
        &self,
        dataset: &mut Self::Dataset,
        transform: &GeoTransform,
    ) -> GdalResult<()>;
    fn projection(&self, dataset: &Self::Dataset) -> String;
    fn set_projection(&self, dataset: &mut Self::Dataset, projection: &str) -> GdalResult<()>;

    fn driver_count(&self) -> usize;
    fn driver(&self, index: usize) -> Option<Self::Driver>;
    fn driver_by_name(&self, name: &str) -> Option<Self::Driver>;
    fn driver_short_name(&self, driver: &Self::Driver) -> String;
    fn driver_metadata_item(&self, driver: &Self::Driver, key: &str, domain: &str)
        -> Option<String>;

    fn create_dataset(
        &self,
        driver: &Self::Driver,
        path: &Path,
        size: (usize, usize),
        band_count: usize,
        pixel_type: PixelType,
        options: &CreateOptions,
    ) -> GdalResult<Self::Dataset>;
    fn create_copy(
        &self,
        driver: &Self::Driver,
        path: &Path,
        source: &Self::Dataset,
        options: &CreateOptions,
    ) -> GdalResult<Self::Dataset>;
    fn close_dataset(&self, dataset: Self::Dataset);
}
