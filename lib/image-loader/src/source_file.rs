use crate::{LoadError, Result};
use std::path::Path;

const IMAGE_MIME_PREFIX: &str = "image/";

/// A user supplied file: name, MIME type and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, sniffing its MIME type from the content.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|error| LoadError::ReadFile {
            error,
            path: path.display().to_string(),
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = sniff_mime(&bytes);
        log::debug!("read {name}: {} bytes, {mime}", bytes.len());

        Ok(Self { name, mime, bytes })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with(IMAGE_MIME_PREFIX)
    }
}

/// Guess a MIME type from magic bytes.
///
/// Undetected UTF-8 content is treated as `text/plain`, anything else as
/// `application/octet-stream`.
pub fn sniff_mime(bytes: &[u8]) -> String {
    match infer::get(bytes) {
        Some(kind) => kind.mime_type().to_string(),
        None if std::str::from_utf8(bytes).is_ok() => "text/plain".to_string(),
        None => "application/octet-stream".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(PNG_MAGIC), "image/png");
        assert_eq!(sniff_mime(b"\xFF\xD8\xFF\xE0\0\x10JFIF"), "image/jpeg");
        assert_eq!(sniff_mime(b"hello world"), "text/plain");
        assert_eq!(sniff_mime(&[0x80, 0x81, 0x82, 0x83]), "application/octet-stream");
    }

    #[test]
    fn test_is_image() {
        assert!(SourceFile::new("a.png", "image/png", vec![]).is_image());
        assert!(SourceFile::new("a.svg", "image/svg+xml", vec![]).is_image());
        assert!(!SourceFile::new("a.txt", "text/plain", vec![]).is_image());
        assert!(!SourceFile::new("a", "application/image", vec![]).is_image());
    }

    #[test]
    fn test_from_path() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("avatar.png");
        std::fs::File::create(&path)?.write_all(PNG_MAGIC)?;

        let file = SourceFile::from_path(&path)?;
        assert_eq!(file.name, "avatar.png");
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes, PNG_MAGIC);
        Ok(())
    }

    #[test]
    fn test_from_missing_path() {
        let err = SourceFile::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, LoadError::ReadFile { .. }));
    }
}
