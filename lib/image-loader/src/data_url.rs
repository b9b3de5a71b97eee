//! `data:` URL encoding and parsing
//!
//! Only the base64 form (`data:<mime>;base64,<payload>`) is produced or
//! accepted.

use crate::{LoadError, Result, SourceFile};
use base64::{Engine as _, engine::general_purpose};

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Encode a source file as a base64 `data:` URL.
pub fn read_as_data_url(file: &SourceFile) -> Result<String> {
    let payload = general_purpose::STANDARD.encode(&file.bytes);
    log::debug!(
        "{} -> data url, {} bytes payload",
        file.name,
        payload.len()
    );

    Ok(format!("{SCHEME}{}{BASE64_MARKER}{payload}", file.mime))
}

/// Split a `data:` URL into its MIME type and decoded payload.
pub fn parse(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix(SCHEME)
        .ok_or_else(|| LoadError::InvalidDataUrl("missing data: scheme".to_string()))?;

    let marker = rest
        .find(BASE64_MARKER)
        .ok_or_else(|| LoadError::InvalidDataUrl("missing ;base64, marker".to_string()))?;

    let mime = rest[..marker].to_string();
    let bytes = general_purpose::STANDARD.decode(&rest[marker + BASE64_MARKER.len()..])?;

    Ok((mime, bytes))
}
