pub mod raster;
pub mod surface;

pub use raster::Raster;
pub use surface::{ExportFormat, Surface};

pub type Result<T> = std::result::Result<T, SurfaceError>;

#[derive(thiserror::Error, Debug)]
pub enum SurfaceError {
    #[error("Raster {width}x{height} needs {expected} samples, got {actual}")]
    SampleLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Region {width}x{height} at ({x}, {y}) is out of bounds for surface {surface_width}x{surface_height}"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        surface_width: u32,
        surface_height: u32,
    },

    #[error("Surface is empty")]
    EmptySurface,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
