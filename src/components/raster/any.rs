use std::path::Path;

use crate::{
    components::{
        engine::{CreateOptions, Engine, GeoTransform, OpenOptions},
        engines::gdal_engine::GdalEngine,
        handle::DatasetHandle,
        raster::Raster,
        PixelType,
    },
    errors::{RastergridError, Result},
};

/// A [Raster] whose element type was picked from the band's pixel type.
#[derive(Debug)]
pub enum AnyRaster<E: Engine = GdalEngine> {
    UInt8(Raster<u8, E>),
    UInt16(Raster<u16, E>),
    Int16(Raster<i16, E>),
    UInt32(Raster<u32, E>),
    Int32(Raster<i32, E>),
    Float32(Raster<f32, E>),
    Float64(Raster<f64, E>),
}

macro_rules! dispatch {
    ($any:expr, $raster:ident => $body:expr) => {
        match $any {
            AnyRaster::UInt8($raster) => $body,
            AnyRaster::UInt16($raster) => $body,
            AnyRaster::Int16($raster) => $body,
            AnyRaster::UInt32($raster) => $body,
            AnyRaster::Int32($raster) => $body,
            AnyRaster::Float32($raster) => $body,
            AnyRaster::Float64($raster) => $body,
        }
    };
}

impl AnyRaster {
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        Self::open_with(&GdalEngine, path, options)
    }
}

impl<E: Engine> AnyRaster<E> {
    /// Open `path` and read the band with the element type its pixel type resolves to.
    ///
    /// A band of `Unknown` pixel type has no element type to allocate and is rejected.
    pub fn open_with(engine: &E, path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let handle = DatasetHandle::open(engine, path.as_ref(), options.access_mode)?;
        let band_index = options.band_index;
        let pixel_type = handle.band_pixel_type(band_index)?;
        Ok(match pixel_type {
            PixelType::UInt8 => AnyRaster::UInt8(Raster::read(handle, band_index)?),
            PixelType::UInt16 => AnyRaster::UInt16(Raster::read(handle, band_index)?),
            PixelType::Int16 => AnyRaster::Int16(Raster::read(handle, band_index)?),
            PixelType::UInt32 => AnyRaster::UInt32(Raster::read(handle, band_index)?),
            PixelType::Int32 => AnyRaster::Int32(Raster::read(handle, band_index)?),
            PixelType::Float32 => AnyRaster::Float32(Raster::read(handle, band_index)?),
            PixelType::Float64 => AnyRaster::Float64(Raster::read(handle, band_index)?),
            PixelType::Unknown => {
                return Err(RastergridError::UnsupportedType {
                    code: PixelType::Unknown.code(),
                })
            }
        })
    }

    pub fn pixel_type(&self) -> PixelType {
        dispatch!(self, raster => raster.pixel_type())
    }

    pub fn path(&self) -> &Path {
        dispatch!(self, raster => raster.path())
    }

    pub fn width(&self) -> usize {
        dispatch!(self, raster => raster.width())
    }

    pub fn height(&self) -> usize {
        dispatch!(self, raster => raster.height())
    }

    pub fn size(&self) -> (usize, usize) {
        dispatch!(self, raster => raster.size())
    }

    pub fn geo_transform(&self) -> &GeoTransform {
        dispatch!(self, raster => raster.geo_transform())
    }

    pub fn spatial_reference(&self) -> &str {
        dispatch!(self, raster => raster.spatial_reference())
    }

    /// Write with the destination declared as this raster's own pixel type.
    pub fn write(&self, destination: impl AsRef<Path>, driver_name: &str) -> Result<()> {
        let pixel_type = self.pixel_type();
        dispatch!(self, raster => raster.write(destination, driver_name, pixel_type))
    }

    pub fn write_with(
        &self,
        destination: impl AsRef<Path>,
        driver_name: &str,
        pixel_type: PixelType,
        options: &CreateOptions,
    ) -> Result<()> {
        dispatch!(self, raster => raster.write_with(destination, driver_name, pixel_type, options))
    }

    pub fn copy(&self, destination: impl AsRef<Path>, driver_name: &str) -> Result<()> {
        dispatch!(self, raster => raster.copy(destination, driver_name))
    }

    pub fn copy_with(
        &self,
        destination: impl AsRef<Path>,
        driver_name: &str,
        options: &CreateOptions,
    ) -> Result<()> {
        dispatch!(self, raster => raster.copy_with(destination, driver_name, options))
    }

    pub fn close(self) {
        dispatch!(self, raster => raster.close())
    }
}

macro_rules! any_raster_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl<E: Engine> From<Raster<$t, E>> for AnyRaster<E> {
            fn from(raster: Raster<$t, E>) -> Self {
                AnyRaster::$variant(raster)
            }
        })*
    };
}

any_raster_from!(
    u8 => UInt8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
);
