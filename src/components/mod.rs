pub mod drivers;
pub mod engine;
pub mod engines;
pub mod handle;
pub mod pixel;
pub mod raster;

pub use drivers::{DriverDescriptor, Drivers};
pub use engine::{AccessMode, CreateOptions, Engine, GeoTransform, OpenOptions};
pub use engines::gdal_engine::GdalEngine;
pub use handle::DatasetHandle;
pub use pixel::{DataType, PixelType};
pub use raster::{any::AnyRaster, Raster};
