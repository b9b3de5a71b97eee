//! Interaction shell
//!
//! Accepts files from a picker or a drag-and-drop gesture, feeds them to the
//! pipeline and exposes the download action once an image is loaded.

use super::{
    download::{self, OutputArtifact},
    pipeline::{Outcome, Pipeline, Ticket},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use image_loader::SourceFile;
use render_surface::ExportFormat;
use std::sync::{Arc, Mutex, MutexGuard};

/// Presentational state. Exactly one of these is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    NoImage,
    /// A file is dragged over the drop target; `underneath` is restored
    /// when the drag ends.
    DragOver {
        underneath: Box<UiState>,
    },
    Loading,
    Loaded {
        width: u32,
        height: u32,
    },
    /// The last file could not be loaded. Picking another file retries.
    Failed {
        reason: String,
    },
}

impl UiState {
    /// The state ignoring an in-progress drag.
    pub fn settled(&self) -> &UiState {
        match self {
            UiState::DragOver { underneath } => underneath.settled(),
            state => state,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, UiState::DragOver { .. })
    }
}

/// Result of handing a file to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Not an `image/*` file; nothing changed.
    Rejected,
    /// A newer file was submitted before this one finished.
    Superseded,
    Loaded { width: u32, height: u32 },
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    pipeline: Pipeline,
    state: Arc<Mutex<UiState>>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UiState {
        self.lock_state().clone()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn drag_enter(&self) {
        let mut state = self.lock_state();
        if !state.is_dragging() {
            let underneath = Box::new(std::mem::take(&mut *state));
            *state = UiState::DragOver { underneath };
        }
    }

    pub fn drag_leave(&self) {
        let mut state = self.lock_state();
        *state = state.settled().clone();
    }

    /// File picker selection.
    pub async fn pick(&self, file: SourceFile) -> Submission {
        self.submit(file).await
    }

    /// File dropped onto the drop target. Ends any drag in progress.
    pub async fn drop_file(&self, file: SourceFile) -> Submission {
        self.drag_leave();
        self.submit(file).await
    }

    async fn submit(&self, file: SourceFile) -> Submission {
        if !file.is_image() {
            log::debug!("ignore {}: {} is not an image", file.name, file.mime);
            return Submission::Rejected;
        }

        let ticket = self.start();
        let outcome = self.pipeline.run_ticket(ticket, file).await;
        self.finish(ticket, outcome)
    }

    /// Issue a ticket and show `Loading` as one step under the state lock.
    fn start(&self) -> Ticket {
        let mut state = self.lock_state();
        let ticket = self.pipeline.begin();
        set_settled(&mut state, UiState::Loading);
        ticket
    }

    /// Settle the UI for a finished run. Stale tickets leave the state alone.
    fn finish(&self, ticket: Ticket, outcome: Outcome) -> Submission {
        let mut state = self.lock_state();
        if !self.pipeline.is_current(ticket) {
            return Submission::Superseded;
        }

        let (settled, submission) = match outcome {
            Outcome::Ready { width, height } => (
                UiState::Loaded { width, height },
                Submission::Loaded { width, height },
            ),
            Outcome::Failed(reason) => (
                UiState::Failed {
                    reason: reason.clone(),
                },
                Submission::Failed { reason },
            ),
            Outcome::Superseded => return Submission::Superseded,
        };

        set_settled(&mut state, settled);
        submission
    }

    pub fn can_download(&self) -> bool {
        matches!(self.lock_state().settled(), UiState::Loaded { .. })
    }

    /// Encode the current surface for download.
    ///
    /// Returns `None` when no image is loaded.
    pub fn download(&self, now: DateTime<Utc>) -> Result<Option<OutputArtifact>> {
        if !self.can_download() {
            log::debug!("download requested without a loaded image");
            return Ok(None);
        }

        let format = ExportFormat::Png;
        let bytes = self
            .pipeline
            .with_surface(|surface| surface.export_encoded(format))
            .with_context(|| "encode surface failed")?;

        Ok(Some(OutputArtifact {
            filename: download::artifact_filename(&now, format),
            bytes,
        }))
    }

    fn lock_state(&self) -> MutexGuard<'_, UiState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn set_settled(state: &mut UiState, settled: UiState) {
    match state {
        UiState::DragOver { underneath } => **underneath = settled,
        state => *state = settled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_file() -> SourceFile {
        SourceFile::new("notes.txt", "text/plain", b"hello".to_vec())
    }

    #[test]
    fn test_drag_enter_leave() {
        let shell = Shell::new();
        shell.drag_enter();
        shell.drag_enter();
        assert_eq!(
            shell.state(),
            UiState::DragOver {
                underneath: Box::new(UiState::NoImage)
            }
        );
        assert!(!shell.can_download());

        shell.drag_leave();
        assert_eq!(shell.state(), UiState::NoImage);
    }

    #[test]
    fn test_settled() {
        let state = UiState::DragOver {
            underneath: Box::new(UiState::Loaded {
                width: 1,
                height: 2,
            }),
        };
        assert!(state.is_dragging());
        assert_eq!(
            state.settled(),
            &UiState::Loaded {
                width: 1,
                height: 2
            }
        );
    }

    #[test]
    fn test_set_settled_keeps_drag() {
        let mut state = UiState::DragOver {
            underneath: Box::new(UiState::NoImage),
        };
        set_settled(&mut state, UiState::Loading);
        assert_eq!(
            state,
            UiState::DragOver {
                underneath: Box::new(UiState::Loading)
            }
        );
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let shell = Shell::new();
        assert_eq!(shell.pick(text_file()).await, Submission::Rejected);
        assert_eq!(shell.state(), UiState::NoImage);

        shell.drag_enter();
        assert_eq!(shell.drop_file(text_file()).await, Submission::Rejected);
        assert_eq!(shell.state(), UiState::NoImage);
        assert!(shell.pipeline().with_surface(|s| s.is_empty()));
    }

    fn png_file(name: &str, width: u32, height: u32) -> SourceFile {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([255; 4]));
        let mut buf = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        SourceFile::new(name, "image/png", buf.into_inner())
    }

    #[tokio::test]
    async fn test_stale_submission_keeps_newer_image_loaded() {
        let shell = Shell::new();
        let stale = shell.start();
        assert_eq!(shell.state(), UiState::Loading);

        let submission = shell.pick(png_file("new.png", 2, 2)).await;
        assert_eq!(submission, Submission::Loaded { width: 2, height: 2 });

        let outcome = shell
            .pipeline
            .run_ticket(stale, png_file("old.png", 5, 5))
            .await;
        assert_eq!(outcome, Outcome::Superseded);
        assert_eq!(shell.finish(stale, outcome), Submission::Superseded);

        assert_eq!(shell.state(), UiState::Loaded { width: 2, height: 2 });
        assert!(shell.can_download());
        assert_eq!(shell.pipeline.with_surface(|s| s.dimensions()), (2, 2));
    }

    #[tokio::test]
    async fn test_stale_finish_after_newer_start() {
        let shell = Shell::new();
        let stale = shell.start();
        let latest = shell.start();

        let outcome = shell
            .pipeline
            .run_ticket(stale, png_file("old.png", 5, 5))
            .await;
        assert_eq!(shell.finish(stale, outcome), Submission::Superseded);
        assert_eq!(shell.state(), UiState::Loading);

        let outcome = shell
            .pipeline
            .run_ticket(latest, png_file("new.png", 1, 3))
            .await;
        assert_eq!(
            shell.finish(latest, outcome),
            Submission::Loaded { width: 1, height: 3 }
        );
        assert_eq!(shell.state(), UiState::Loaded { width: 1, height: 3 });
    }

    #[test]
    fn test_download_without_image() {
        let shell = Shell::new();
        assert!(shell.download(Utc::now()).unwrap().is_none());
    }
}
