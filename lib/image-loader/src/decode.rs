use crate::{LoadError, Raster, Result, data_url};

/// Decode a `data:` URL into an RGBA8 raster.
///
/// The image format is guessed from the payload, not from the URL's MIME
/// type, so a mislabelled file still decodes.
pub fn decode_data_url(url: &str) -> Result<Raster> {
    let (mime, bytes) = data_url::parse(url)?;
    let image = image::load_from_memory(&bytes)?.to_rgba8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(LoadError::EmptyImage { width, height });
    }

    log::debug!("decoded {mime}: {width}x{height}");
    Ok(Raster::from(image))
}
