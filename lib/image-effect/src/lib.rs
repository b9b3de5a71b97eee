//! Pixel effects over raw RGBA8 sample buffers.
//!
//! Samples are channel-interleaved, four bytes per pixel (`R, G, B, A`).
//! Effects mutate the buffer in place and never change its length.

pub mod channel_effect;

pub use channel_effect::{CHANNEL_FACTOR, GreenTint, green_tint, scale_channel};

/// Number of samples per RGBA pixel.
pub const CHANNELS: usize = 4;

pub trait Effect {
    /// Effect name, used in log lines.
    fn name(&self) -> &'static str;

    /// Apply the effect in place to an RGBA8 sample buffer.
    ///
    /// The buffer length must be a multiple of [`CHANNELS`].
    fn apply(&self, samples: &mut [u8]);
}
