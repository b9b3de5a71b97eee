use crate::{Result, SurfaceError};
use image::RgbaImage;

/// A decoded image: dimensions plus row-major RGBA8 samples.
///
/// The sample length always equals `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let expected = sample_len(width, height);
        if samples.len() != expected {
            return Err(SurfaceError::SampleLength {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A raster with every pixel set to `pixel`.
    #[cfg(test)]
    pub(crate) fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let samples = pixel.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }
}

impl From<Raster> for RgbaImage {
    fn from(raster: Raster) -> Self {
        let (width, height) = (raster.width, raster.height);
        RgbaImage::from_raw(width, height, raster.samples)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

pub(crate) fn sample_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
