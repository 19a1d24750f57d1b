pub mod any;
mod persist;

use geo::AffineTransform;
use log::{info, warn};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use std::{fmt::Debug, path::Path};

use crate::{
    components::{
        engine::{Engine, GeoTransform, OpenOptions, DEFAULT_GEO_TRANSFORM},
        engines::gdal_engine::GdalEngine,
        handle::DatasetHandle,
        DataType, PixelType,
    },
    errors::{RastergridError, Result},
};

fn affine_from_gdal(gdal_transform: &GeoTransform) -> AffineTransform {
    AffineTransform::new(
        gdal_transform[1],
        gdal_transform[2],
        gdal_transform[0],
        gdal_transform[4],
        gdal_transform[5],
        gdal_transform[3],
    )
}

/// One band of an opened dataset, read into memory.
///
/// `data` has shape `(width, height)` and is addressed as `data[[x, y]]`:
/// it is the transpose of the engine's line-major buffer. Writes apply the
/// inverse, so reading back what was written gives the same grid.
///
/// `data` is a snapshot. Editing it never touches the dataset, and closing
/// the dataset keeps it valid.
pub struct Raster<T: DataType, E: Engine = GdalEngine> {
    handle: DatasetHandle<E>,
    width: usize,
    height: usize,
    geo_transform: GeoTransform,
    spatial_reference: String,
    data: Array2<T>,
}

impl<T: DataType, E: Engine> Debug for Raster<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("path", &self.handle.path())
            .field("size", &(self.width, self.height))
            .field("pixel_type", &T::PIXEL_TYPE)
            .field("geo_transform", &self.geo_transform)
            .finish()
    }
}

impl<T: DataType> Raster<T> {
    /// Open `path` with gdal and read one band as `T`.
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        Self::open_with(&GdalEngine, path, options)
    }
}

impl<T: DataType, E: Engine> Raster<T, E> {
    pub fn open_with(engine: &E, path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let handle = DatasetHandle::open(engine, path.as_ref(), options.access_mode)?;
        Self::read(handle, options.band_index)
    }

    /// Read `band_index` of an opened dataset.
    ///
    /// A band of `Unknown` type is read as `T`; any other type must be `T`'s.
    pub(crate) fn read(handle: DatasetHandle<E>, band_index: usize) -> Result<Self> {
        let pixel_type = handle.band_pixel_type(band_index)?;
        if pixel_type != PixelType::Unknown && pixel_type != T::PIXEL_TYPE {
            return Err(RastergridError::TypeMismatch {
                expected: T::PIXEL_TYPE,
                found: pixel_type,
            });
        }

        let engine = handle.engine();
        let (width, height) = engine.raster_size(handle.dataset());
        let mut buffer = vec![T::zero(); width * height];
        engine
            .read_band(handle.dataset(), band_index, (width, height), &mut buffer)
            .map_err(|source| RastergridError::ReadFailed {
                path: handle.path().to_path_buf(),
                band_index,
                source,
            })?;

        let geo_transform = engine.geo_transform(handle.dataset()).unwrap_or_else(|err| {
            warn!("{:?} has no geotransform ({err}), using default", handle.path());
            DEFAULT_GEO_TRANSFORM
        });
        let spatial_reference = engine.projection(handle.dataset());

        let data = Array2::from_shape_vec((height, width), buffer)?.reversed_axes();

        let raster = Self {
            handle,
            width,
            height,
            geo_transform,
            spatial_reference,
            data,
        };
        info!("new {raster:?}");
        Ok(raster)
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_type(&self) -> PixelType {
        T::PIXEL_TYPE
    }

    pub fn geo_transform(&self) -> &GeoTransform {
        &self.geo_transform
    }

    /// Pixel/line to world coordinates.
    pub fn affine_transform(&self) -> AffineTransform {
        affine_from_gdal(&self.geo_transform)
    }

    /// Well known text of the coordinate reference system, empty if the dataset has none.
    pub fn spatial_reference(&self) -> &str {
        &self.spatial_reference
    }

    /// Reference system used by later writes. The opened dataset keeps its own.
    pub fn set_spatial_reference(&mut self, spatial_reference: impl Into<String>) {
        self.spatial_reference = spatial_reference.into();
    }

    pub fn data(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Pixel values can be edited, the grid's shape can not.
    pub fn data_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.data.get((x, y)).copied()
    }

    pub fn handle(&self) -> &DatasetHandle<E> {
        &self.handle
    }

    /// Release the dataset, keeping the grid.
    pub fn into_data(self) -> Array2<T> {
        let Raster { handle, data, .. } = self;
        handle.close();
        data
    }

    pub fn close(self) {
        self.handle.close()
    }

    /// The grid in the engine's line-major order.
    pub(crate) fn line_major(&self) -> Vec<T> {
        self.data.t().iter().copied().collect()
    }
}
