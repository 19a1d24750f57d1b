use log::{debug, info};
use std::path::Path;

use crate::{
    components::{
        drivers::Drivers,
        engine::{CreateOptions, Engine},
        handle::DatasetHandle,
        raster::Raster,
        DataType, PixelType,
    },
    errors::{RastergridError, Result},
};

impl<T: DataType, E: Engine> Raster<T, E> {
    /// Write the grid as a new single band dataset through `driver_name`'s create.
    ///
    /// `pixel_type` is the declared band type of the destination; samples are
    /// handed to the engine as `T` without coercion.
    pub fn write(
        &self,
        destination: impl AsRef<Path>,
        driver_name: &str,
        pixel_type: PixelType,
    ) -> Result<()> {
        self.write_with(destination, driver_name, pixel_type, &CreateOptions::default())
    }

    pub fn write_with(
        &self,
        destination: impl AsRef<Path>,
        driver_name: &str,
        pixel_type: PixelType,
        options: &CreateOptions,
    ) -> Result<()> {
        let destination = destination.as_ref();
        let engine = self.handle().engine();
        let driver = Drivers::new(engine.clone()).require(driver_name, false)?;

        let mut target = DatasetHandle::create(
            engine,
            &driver,
            driver_name,
            destination,
            self.size(),
            1,
            pixel_type,
            options,
        )?;
        debug!("created {destination:?} with {driver_name} as {pixel_type}");

        engine
            .set_geo_transform(target.dataset_mut(), self.geo_transform())
            .map_err(|source| RastergridError::SetTransformFailed {
                path: destination.to_path_buf(),
                source,
            })?;
        engine
            .set_projection(target.dataset_mut(), self.spatial_reference())
            .map_err(|source| RastergridError::SetProjectionFailed {
                path: destination.to_path_buf(),
                source,
            })?;
        engine
            .write_band(target.dataset_mut(), 1, self.size(), self.line_major())
            .map_err(|source| RastergridError::WriteFailed {
                path: destination.to_path_buf(),
                source,
            })?;

        target.close();
        info!("wrote {:?} to {destination:?}", self.path());
        Ok(())
    }

    /// Clone the opened source dataset to `destination` with `driver_name`'s create-copy.
    ///
    /// Pixels, geotransform and spatial reference are whatever the engine copies;
    /// the grid held in memory is not used.
    pub fn copy(&self, destination: impl AsRef<Path>, driver_name: &str) -> Result<()> {
        self.copy_with(destination, driver_name, &CreateOptions::default())
    }

    pub fn copy_with(
        &self,
        destination: impl AsRef<Path>,
        driver_name: &str,
        options: &CreateOptions,
    ) -> Result<()> {
        let destination = destination.as_ref();
        let driver = Drivers::new(self.handle().engine().clone()).require(driver_name, true)?;
        DatasetHandle::create_copy(&driver, driver_name, destination, self.handle(), options)?
            .close();
        info!("copied {:?} to {destination:?} with {driver_name}", self.path());
        Ok(())
    }
}
