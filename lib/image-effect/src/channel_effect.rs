//! Channel scaling effects
//!
//! Suppresses the red and blue channels so that green dominates the image.

use crate::{CHANNELS, Effect};

/// Factor applied to the red and blue samples.
pub const CHANNEL_FACTOR: f32 = 0.3;

// CHANNEL_FACTOR as an exact ratio, so the 8-bit conversion is reproducible.
const FACTOR_NUMERATOR: u16 = 3;
const FACTOR_DENOMINATOR: u16 = 10;

/// Scale one sample by [`CHANNEL_FACTOR`], rounding half to even.
///
/// ```
/// use image_effect::scale_channel;
///
/// assert_eq!(scale_channel(255), 76); // 76.5
/// assert_eq!(scale_channel(5), 2); // 1.5
/// assert_eq!(scale_channel(100), 30);
/// ```
pub const fn scale_channel(value: u8) -> u8 {
    let scaled = value as u16 * FACTOR_NUMERATOR;
    let quotient = scaled / FACTOR_DENOMINATOR;
    let remainder = scaled % FACTOR_DENOMINATOR;
    let half = FACTOR_DENOMINATOR / 2;

    let rounded = if remainder > half || (remainder == half && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };

    rounded as u8
}

const fn build_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        lut[i] = scale_channel(i as u8);
        i += 1;
    }
    lut
}

static SCALE_LUT: [u8; 256] = build_lut();

/// Tint an RGBA8 buffer green in place.
///
/// Red and blue samples are scaled by [`CHANNEL_FACTOR`], green and alpha are
/// left untouched. An empty buffer is a no-op.
pub fn green_tint(samples: &mut [u8]) {
    debug_assert!(
        samples.len() % CHANNELS == 0,
        "RGBA buffer length {} is not a multiple of {CHANNELS}",
        samples.len()
    );

    for pixel in samples.chunks_exact_mut(CHANNELS) {
        pixel[0] = SCALE_LUT[pixel[0] as usize];
        pixel[2] = SCALE_LUT[pixel[2] as usize];
    }
}

/// The fixed green tint effect
#[derive(Debug, Clone, Copy, Default)]
pub struct GreenTint;

impl Effect for GreenTint {
    fn name(&self) -> &'static str {
        "Green Tint"
    }

    fn apply(&self, samples: &mut [u8]) {
        log::trace!("{}: {} pixels", self.name(), samples.len() / CHANNELS);
        green_tint(samples);
    }
}
