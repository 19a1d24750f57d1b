use log::debug;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use crate::{
    components::{
        engine::{AccessMode, CreateOptions, Engine},
        PixelType,
    },
    errors::{RastergridError, Result},
};

/// Exclusively owned engine dataset.
///
/// The dataset is released exactly once, when the handle is closed or
/// dropped, whichever exit path is taken.
pub struct DatasetHandle<E: Engine> {
    engine: E,
    path: PathBuf,
    dataset: E::Dataset,
}

impl<E: Engine> Debug for DatasetHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetHandle")
            .field("engine", &self.engine)
            .field("path", &self.path)
            .finish()
    }
}

impl<E: Engine> DatasetHandle<E> {
    fn new(engine: &E, path: &Path, dataset: E::Dataset) -> Self {
        debug!("acquired {path:?}");
        Self {
            engine: engine.clone(),
            path: path.to_path_buf(),
            dataset,
        }
    }

    pub fn open(engine: &E, path: &Path, access_mode: AccessMode) -> Result<Self> {
        let dataset = engine
            .open_dataset(path, access_mode)
            .map_err(|source| RastergridError::OpenFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(engine, path, dataset))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create(
        engine: &E,
        driver: &E::Driver,
        driver_name: &str,
        path: &Path,
        size: (usize, usize),
        band_count: usize,
        pixel_type: PixelType,
        options: &CreateOptions,
    ) -> Result<Self> {
        let dataset = engine
            .create_dataset(driver, path, size, band_count, pixel_type, options)
            .map_err(|source| RastergridError::CreateFailed {
                driver: driver_name.to_string(),
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(engine, path, dataset))
    }

    pub fn create_copy(
        driver: &E::Driver,
        driver_name: &str,
        path: &Path,
        from: &DatasetHandle<E>,
        options: &CreateOptions,
    ) -> Result<Self> {
        let engine = from.engine();
        let dataset = engine
            .create_copy(driver, path, from.dataset(), options)
            .map_err(|source| RastergridError::CreateFailed {
                driver: driver_name.to_string(),
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(engine, path, dataset))
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &E::Dataset {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut E::Dataset {
        &mut self.dataset
    }

    /// Pixel type of the 1-based `band_index`.
    pub fn band_pixel_type(&self, band_index: usize) -> Result<PixelType> {
        let code = self
            .engine
            .band_type(self.dataset(), band_index)
            .map_err(|source| RastergridError::ReadFailed {
                path: self.path.clone(),
                band_index,
                source,
            })?;
        PixelType::resolve(code)
    }

    pub fn close(self) {
        let DatasetHandle {
            engine,
            path,
            dataset,
        } = self;
        debug!("releasing {path:?}");
        engine.close_dataset(dataset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::engines::memory_engine::{MemoryEngine, MemoryFile, Step};

    fn engine() -> MemoryEngine {
        let engine = MemoryEngine::default();
        engine.add_file(
            "a.tif",
            MemoryFile::new((2, 2), PixelType::UInt8, vec![1., 2., 3., 4.]),
        );
        engine
    }

    #[test]
    fn releases_once_on_close() {
        let engine = engine();
        let handle =
            DatasetHandle::open(&engine, Path::new("a.tif"), AccessMode::ReadOnly).unwrap();
        assert_eq!(engine.open_handles("a.tif"), 1);
        handle.close();
        assert_eq!(engine.releases("a.tif"), 1);
        assert_eq!(engine.open_handles("a.tif"), 0);
    }

    #[test]
    fn releases_once_on_early_return() {
        fn failing(engine: &MemoryEngine) -> Result<()> {
            let handle = DatasetHandle::open(engine, Path::new("a.tif"), AccessMode::Update)?;
            handle.band_pixel_type(2)?;
            Ok(())
        }
        let engine = engine();
        assert!(matches!(
            failing(&engine),
            Err(RastergridError::ReadFailed { band_index: 2, .. })
        ));
        assert_eq!(engine.releases("a.tif"), 1);
    }

    #[test]
    fn failed_open_acquires_nothing() {
        let engine = engine();
        engine.fail_at(Step::Open);
        let result = DatasetHandle::open(&engine, Path::new("a.tif"), AccessMode::ReadOnly);
        assert!(matches!(result, Err(RastergridError::OpenFailed { .. })));
        assert_eq!(engine.releases("a.tif"), 0);
    }

    #[test]
    fn releases_once_on_drop() {
        let engine = engine();
        let handle =
            DatasetHandle::open(&engine, Path::new("a.tif"), AccessMode::ReadOnly).unwrap();
        drop(handle);
        assert_eq!(engine.releases("a.tif"), 1);
        assert_eq!(engine.open_handles("a.tif"), 0);
    }
}
