use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use render_surface::ExportFormat;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Fixed label appended to every downloaded file name.
pub const FILENAME_LABEL: &str = "green-avatar";

/// An encoded image ready to be saved.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl OutputArtifact {
    /// Write the artifact into `dir`, creating the directory if needed.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).with_context(|| format!("create {} failed", dir.display()))?;

        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)
            .with_context(|| format!("write {} failed", path.display()))?;

        log::info!("saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// `<compact ISO-8601 timestamp>-green-avatar.<ext>`
pub fn artifact_filename(now: &DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "{}-{FILENAME_LABEL}.{}",
        cutil::time::compact_iso8601(now),
        format.extension()
    )
}
