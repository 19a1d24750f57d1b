use log::debug;
use std::path::Path;

use crate::components::{
    engine::{AccessMode, CreateOptions, Engine, GeoTransform},
    DataType, PixelType,
};

/// Implementations for gdal
pub mod gdal_engine {
    use super::*;
    use gdal::{
        errors::{GdalError, Result as GdalResult},
        raster::{Buffer, RasterCreationOptions},
        Dataset as GdalDataset, DatasetOptions, Driver as GdalDriver, DriverManager,
        GdalOpenFlags, Metadata as GdalMetadata,
    };
    use gdal_sys::CPLErr;
    use std::{
        ffi::{CStr, CString},
        sync::Once,
    };

    static REGISTER_DRIVERS: Once = Once::new();

    /// Turn a `CPLErr` status into the error gdal left behind.
    fn check_cpl(status: CPLErr::Type) -> GdalResult<()> {
        if status == CPLErr::CE_None {
            return Ok(());
        }
        let (number, msg) = unsafe {
            let msg = gdal_sys::CPLGetLastErrorMsg();
            let msg = if msg.is_null() {
                String::new()
            } else {
                CStr::from_ptr(msg).to_string_lossy().into_owned()
            };
            (gdal_sys::CPLGetLastErrorNo(), msg)
        };
        Err(GdalError::CplError {
            class: status,
            number,
            msg,
        })
    }

    fn creation_options(options: &CreateOptions) -> GdalResult<RasterCreationOptions> {
        let mut list = RasterCreationOptions::new();
        for (key, value) in options.iter() {
            list.set_name_value(key, value)?;
        }
        Ok(list)
    }

    #[derive(Debug, Default, Clone, Copy)]
    pub struct GdalEngine;

    impl GdalEngine {
        /// Register every driver gdal was built with.
        ///
        /// Belongs to process start up; calling it again is a no-op.
        pub fn init() -> Self {
            REGISTER_DRIVERS.call_once(|| {
                DriverManager::register_all();
                debug!("registered {} gdal drivers", DriverManager::count());
            });
            GdalEngine
        }
    }

    impl Engine for GdalEngine {
        type Dataset = GdalDataset;
        type Driver = GdalDriver;

        fn open_dataset(&self, path: &Path, access_mode: AccessMode) -> GdalResult<GdalDataset> {
            let mut open_flags = GdalOpenFlags::GDAL_OF_RASTER;
            if access_mode == AccessMode::Update {
                open_flags |= GdalOpenFlags::GDAL_OF_UPDATE;
            }
            GdalDataset::open_ex(
                path,
                DatasetOptions {
                    open_flags,
                    ..DatasetOptions::default()
                },
            )
        }

        fn raster_size(&self, dataset: &GdalDataset) -> (usize, usize) {
            dataset.raster_size()
        }

        fn band_type(&self, dataset: &GdalDataset, band_index: usize) -> GdalResult<u32> {
            let rasterband = dataset.rasterband(band_index)?;
            // `band_type()` folds complex and unlisted types into Unknown.
            let code = unsafe { gdal_sys::GDALGetRasterDataType(rasterband.c_rasterband()) };
            Ok(code as u32)
        }

        fn read_band<T: DataType>(
            &self,
            dataset: &GdalDataset,
            band_index: usize,
            size: (usize, usize),
            buffer: &mut [T],
        ) -> GdalResult<()> {
            dataset
                .rasterband(band_index)?
                .read_into_slice::<T>((0, 0), size, size, buffer, None)
        }

        fn write_band<T: DataType>(
            &self,
            dataset: &mut GdalDataset,
            band_index: usize,
            size: (usize, usize),
            buffer: Vec<T>,
        ) -> GdalResult<()> {
            let mut rasterband = dataset.rasterband(band_index)?;
            let mut buffer = Buffer::new(size, buffer);
            rasterband.write((0, 0), size, &mut buffer)
        }

        fn geo_transform(&self, dataset: &GdalDataset) -> GdalResult<GeoTransform> {
            dataset.geo_transform()
        }

        fn set_geo_transform(
            &self,
            dataset: &mut GdalDataset,
            transform: &GeoTransform,
        ) -> GdalResult<()> {
            dataset.set_geo_transform(transform)
        }

        fn projection(&self, dataset: &GdalDataset) -> String {
            dataset.projection()
        }

        fn set_projection(&self, dataset: &mut GdalDataset, projection: &str) -> GdalResult<()> {
            let projection = CString::new(projection)?;
            // `Dataset::set_projection` drops the status GDALSetProjection returns.
            let status =
                unsafe { gdal_sys::GDALSetProjection(dataset.c_dataset(), projection.as_ptr()) };
            check_cpl(status)
        }

        fn driver_count(&self) -> usize {
            DriverManager::count()
        }

        fn driver(&self, index: usize) -> Option<GdalDriver> {
            DriverManager::get_driver(index).ok()
        }

        fn driver_by_name(&self, name: &str) -> Option<GdalDriver> {
            DriverManager::get_driver_by_name(name).ok()
        }

        fn driver_short_name(&self, driver: &GdalDriver) -> String {
            driver.short_name()
        }

        fn driver_metadata_item(
            &self,
            driver: &GdalDriver,
            key: &str,
            domain: &str,
        ) -> Option<String> {
            GdalMetadata::metadata_item(driver, key, domain)
        }

        fn create_dataset(
            &self,
            driver: &GdalDriver,
            path: &Path,
            size: (usize, usize),
            band_count: usize,
            pixel_type: PixelType,
            options: &CreateOptions,
        ) -> GdalResult<GdalDataset> {
            let options = creation_options(options)?;
            let (width, height) = size;
            macro_rules! create {
                ($t:ty) => {
                    driver.create_with_band_type_with_options::<$t, _>(
                        path, width, height, band_count, &options,
                    )
                };
            }
            match pixel_type {
                PixelType::UInt8 => create!(u8),
                PixelType::UInt16 => create!(u16),
                PixelType::Int16 => create!(i16),
                PixelType::UInt32 => create!(u32),
                PixelType::Int32 => create!(i32),
                PixelType::Float32 => create!(f32),
                PixelType::Float64 => create!(f64),
                PixelType::Unknown => Err(GdalError::BadArgument(
                    "can not create a band of unknown pixel type".to_string(),
                )),
            }
        }

        fn create_copy(
            &self,
            driver: &GdalDriver,
            path: &Path,
            source: &GdalDataset,
            options: &CreateOptions,
        ) -> GdalResult<GdalDataset> {
            source.create_copy(driver, path, &creation_options(options)?)
        }

        fn close_dataset(&self, dataset: GdalDataset) {
            // GDALClose runs on drop.
            drop(dataset)
        }
    }
}
