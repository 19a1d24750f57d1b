//! Read one band of a raster dataset into an [ndarray] grid and write or
//! copy it back out through gdal drivers.
//!
//! ```no_run
//! use rastergrid::{GdalEngine, OpenOptions, PixelType, Raster};
//!
//! GdalEngine::init();
//! let raster = Raster::<u8>::open("dem.tif", OpenOptions::default())?;
//! raster.write("dem_copy.tif", "GTiff", PixelType::UInt8)?;
//! # Ok::<(), rastergrid::RastergridError>(())
//! ```

mod components;
mod errors;

pub use components::{
    AccessMode, AnyRaster, CreateOptions, DataType, DatasetHandle, DriverDescriptor, Drivers,
    Engine, GdalEngine, GeoTransform, OpenOptions, PixelType, Raster,
};
pub use errors::{RastergridError, Result};

use log::info;
use std::path::Path;

/// Copy band 1 of `source` to `destination` with `driver_name`'s create-copy.
///
/// The opened source is released before returning, whether the copy succeeded or not.
pub fn translate(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    driver_name: &str,
) -> Result<()> {
    translate_with(&GdalEngine, source, destination, driver_name)
}

pub fn translate_with<E: Engine>(
    engine: &E,
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    driver_name: &str,
) -> Result<()> {
    let raster = AnyRaster::open_with(engine, source, OpenOptions::default())?;
    info!("translating {:?} with {driver_name}", raster.path());
    raster.copy(destination, driver_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::engines::memory_engine::{MemoryEngine, MemoryFile};

    fn engine() -> MemoryEngine {
        let engine = MemoryEngine::with_drivers(&[
            Some(("GTiff", true, true)),
            Some(("CEOS", false, false)),
        ]);
        engine.add_file(
            "source.tif",
            MemoryFile::new((4, 3), PixelType::UInt8, vec![7.; 12]),
        );
        engine
    }

    #[test_log::test]
    fn translate_copies_and_releases_source() {
        let engine = engine();
        translate_with(&engine, "source.tif", "dest.tif", "GTiff").unwrap();
        assert_eq!(engine.file("dest.tif"), engine.file("source.tif"));
        assert_eq!(engine.releases("dest.tif"), 1);
        assert_eq!(engine.releases("source.tif"), 1);
    }

    #[test_log::test]
    fn translate_to_driver_without_capabilities() {
        let engine = engine();
        let result = translate_with(&engine, "source.tif", "dest.ceos", "CEOS");
        assert!(matches!(
            result,
            Err(RastergridError::UnsupportedOperation { .. })
        ));
        assert_eq!(engine.create_copy_calls(), 0);
        assert!(engine.file("dest.ceos").is_none());
        assert_eq!(engine.releases("source.tif"), 1);
    }

    #[test]
    fn failed_copy_leaves_source_open() {
        let engine = engine();
        let raster =
            AnyRaster::open_with(&engine, "source.tif", OpenOptions::default()).unwrap();
        assert!(raster.copy("dest.ceos", "CEOS").is_err());
        assert_eq!(engine.open_handles("source.tif"), 1);
        raster.close();
        assert_eq!(engine.open_handles("source.tif"), 0);
    }

    #[test]
    fn translate_missing_source() {
        let engine = engine();
        let result = translate_with(&engine, "missing.tif", "dest.tif", "GTiff");
        assert!(matches!(result, Err(RastergridError::OpenFailed { .. })));
        assert_eq!(engine.create_copy_calls(), 0);
    }
}
