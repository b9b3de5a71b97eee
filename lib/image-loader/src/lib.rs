//! Turns user supplied image files into decoded rasters.
//!
//! Loading happens in two steps, mirroring how a browser hands a picked file
//! to an `<img>` element:
//!
//! 1. [`read_as_data_url`] - encode the file as a `data:` URL
//! 2. [`decode_data_url`] - decode the URL payload into an RGBA8 [`Raster`]

pub mod data_url;
pub mod decode;
pub mod source_file;

pub use data_url::read_as_data_url;
pub use decode::decode_data_url;
pub use render_surface::Raster;
pub use source_file::SourceFile;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to read file: {path}. Error: {error}")]
    ReadFile { error: std::io::Error, path: String },
}
