use gdal::raster::GdalType;
use num::{Num, NumCast};
use std::fmt::{Debug, Display};

use crate::errors::{RastergridError, Result};

/// Pixel encoding of a band, as numbered by the engine.
///
/// `Unknown` (code `0`) is a placeholder for bands whose encoding
/// the caller cannot commit to; it has no element type of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    Unknown,
    UInt8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl PixelType {
    pub const ALL: [PixelType; 8] = [
        PixelType::Unknown,
        PixelType::UInt8,
        PixelType::UInt16,
        PixelType::Int16,
        PixelType::UInt32,
        PixelType::Int32,
        PixelType::Float32,
        PixelType::Float64,
    ];

    /// Resolve an engine pixel type code.
    ///
    /// Codes `0..=7` are total; anything else is [RastergridError::UnsupportedType].
    pub fn resolve(code: u32) -> Result<Self> {
        match code {
            0 => Ok(PixelType::Unknown),
            1 => Ok(PixelType::UInt8),
            2 => Ok(PixelType::UInt16),
            3 => Ok(PixelType::Int16),
            4 => Ok(PixelType::UInt32),
            5 => Ok(PixelType::Int32),
            6 => Ok(PixelType::Float32),
            7 => Ok(PixelType::Float64),
            code => Err(RastergridError::UnsupportedType { code }),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            PixelType::Unknown => 0,
            PixelType::UInt8 => 1,
            PixelType::UInt16 => 2,
            PixelType::Int16 => 3,
            PixelType::UInt32 => 4,
            PixelType::Int32 => 5,
            PixelType::Float32 => 6,
            PixelType::Float64 => 7,
        }
    }
}

impl TryFrom<u32> for PixelType {
    type Error = RastergridError;
    fn try_from(value: u32) -> Result<Self> {
        PixelType::resolve(value)
    }
}

impl Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PixelType::Unknown => "Unknown",
            PixelType::UInt8 => "Byte",
            PixelType::UInt16 => "UInt16",
            PixelType::Int16 => "Int16",
            PixelType::UInt32 => "UInt32",
            PixelType::Int32 => "Int32",
            PixelType::Float32 => "Float32",
            PixelType::Float64 => "Float64",
        };
        f.write_str(name)
    }
}

/// Element type of an in-memory grid.
pub trait DataType:
    Num + NumCast + Copy + Default + PartialOrd + Debug + GdalType + 'static
{
    const PIXEL_TYPE: PixelType;
}

macro_rules! data_type {
    ($($t:ty => $pixel_type:ident),* $(,)?) => {
        $(impl DataType for $t {
            const PIXEL_TYPE: PixelType = PixelType::$pixel_type;
        })*
    };
}

data_type!(
    u8 => UInt8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
);
