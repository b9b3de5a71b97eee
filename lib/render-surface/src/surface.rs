//! Addressable RGBA pixel buffer
//!
//! The surface is both the paint target for decoded images and the
//! source/destination of pixel effects. It starts out empty (0x0).

use crate::{Raster, Result, SurfaceError, raster::sample_len};
use image::{ImageFormat, RgbaImage, imageops};
use std::io::Cursor;

/// Encodings supported by [`Surface::export_encoded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Reinitialise the backing buffer to transparent black.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!(
            "resize surface {}x{} -> {width}x{height}",
            self.width(),
            self.height()
        );
        self.image = RgbaImage::new(width, height);
    }

    /// Draw `raster` at the origin, clipped to the surface bounds.
    pub fn paint(&mut self, raster: &Raster) {
        let source = RgbaImage::from(raster.clone());
        imageops::replace(&mut self.image, &source, 0, 0);
    }

    /// Copy out the `width x height` region starting at `(x, y)`.
    pub fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Raster> {
        self.check_region(x, y, width, height)?;

        let row_len = width as usize * 4;
        let mut samples = Vec::with_capacity(sample_len(width, height));
        let raw = self.image.as_raw();
        for row in y..y + height {
            let start = self.offset(x, row);
            samples.extend_from_slice(&raw[start..start + row_len]);
        }

        Raster::new(width, height, samples)
    }

    /// Commit `raster` back into the surface with its top-left corner at `(x, y)`.
    pub fn write_pixels(&mut self, raster: &Raster, x: u32, y: u32) -> Result<()> {
        self.check_region(x, y, raster.width(), raster.height())?;

        let row_len = raster.width() as usize * 4;
        if row_len == 0 {
            return Ok(());
        }

        let surface_width = self.width() as usize;
        let raw: &mut [u8] = &mut self.image;
        for (i, src) in raster.samples().chunks_exact(row_len).enumerate() {
            let start = ((y as usize + i) * surface_width + x as usize) * 4;
            raw[start..start + row_len].copy_from_slice(src);
        }

        Ok(())
    }

    /// Serialize the current surface contents.
    pub fn export_encoded(&self, format: ExportFormat) -> Result<Vec<u8>> {
        if self.is_empty() {
            return Err(SurfaceError::EmptySurface);
        }

        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, format.image_format())?;
        Ok(buf.into_inner())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width() as usize + x as usize) * 4
    }

    fn check_region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        let fits = |start: u32, len: u32, max: u32| {
            start.checked_add(len).is_some_and(|end| end <= max)
        };

        if fits(x, width, self.width()) && fits(y, height, self.height()) {
            Ok(())
        } else {
            Err(SurfaceError::OutOfBounds {
                x,
                y,
                width,
                height,
                surface_width: self.width(),
                surface_height: self.height(),
            })
        }
    }
}
