//! Image decode pipeline
//!
//! Drives one upload through `Idle -> Reading -> Decoding -> Ready` (or
//! `Failed`) and leaves the tinted result on the render surface.
//!
//! Every run carries a ticket from a monotonically increasing generation
//! counter. A run whose ticket is no longer the latest stops at its next
//! step and never touches the surface, so only the most recent upload can
//! reach it.

use image_effect::{Effect, GreenTint};
use image_loader::{Raster, SourceFile};
use render_surface::Surface;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};

const EFFECT: GreenTint = GreenTint;

/// Ticket identifying one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Reading,
    Decoding,
    Ready {
        width: u32,
        height: u32,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ready { width: u32, height: u32 },
    Failed(String),
    /// A newer run was started before this one finished.
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    generation: AtomicU64,
    state: Mutex<PipelineState>,
    surface: Mutex<Surface>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a new run, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// State of the most recent run.
    pub fn state(&self) -> PipelineState {
        lock(&self.inner.state).clone()
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&Surface) -> R) -> R {
        f(&lock(&self.inner.surface))
    }

    /// Start a run and drive it to completion.
    pub async fn run(&self, file: SourceFile) -> Outcome {
        let ticket = self.begin();
        self.run_ticket(ticket, file).await
    }

    /// Drive a run for a ticket previously issued by [`Pipeline::begin`].
    pub async fn run_ticket(&self, ticket: Ticket, file: SourceFile) -> Outcome {
        let name = file.name.clone();

        if !self.transition(ticket, PipelineState::Reading) {
            return Outcome::Superseded;
        }
        log::debug!("[{}] reading {name}", ticket.0);

        let url = match blocking(move || image_loader::read_as_data_url(&file)).await {
            Ok(url) => url,
            Err(reason) => return self.fail(ticket, &name, reason),
        };

        if !self.transition(ticket, PipelineState::Decoding) {
            return Outcome::Superseded;
        }
        log::debug!("[{}] decoding {name}", ticket.0);

        let raster = match blocking(move || image_loader::decode_data_url(&url)).await {
            Ok(raster) => raster,
            Err(reason) => return self.fail(ticket, &name, reason),
        };

        match self.commit(ticket, &raster) {
            Ok(true) => (),
            Ok(false) => return Outcome::Superseded,
            Err(reason) => return self.fail(ticket, &name, reason),
        }

        let (width, height) = (raster.width(), raster.height());
        if !self.transition(ticket, PipelineState::Ready { width, height }) {
            return Outcome::Superseded;
        }
        log::info!("[{}] {name} ready: {width}x{height}", ticket.0);

        Outcome::Ready { width, height }
    }

    /// Paint `raster` onto the surface and tint it, if `ticket` is still current.
    ///
    /// The effect runs only after the whole raster has been painted.
    fn commit(&self, ticket: Ticket, raster: &Raster) -> Result<bool, String> {
        let mut surface = lock(&self.inner.surface);
        if !self.is_current(ticket) {
            log::debug!("[{}] stale decode result dropped", ticket.0);
            return Ok(false);
        }

        let (width, height) = (raster.width(), raster.height());
        surface.resize(width, height);
        surface.paint(raster);

        let mut pixels = surface
            .read_pixels(0, 0, width, height)
            .map_err(|e| e.to_string())?;
        EFFECT.apply(pixels.samples_mut());
        surface
            .write_pixels(&pixels, 0, 0)
            .map_err(|e| e.to_string())?;

        Ok(true)
    }

    fn fail(&self, ticket: Ticket, name: &str, reason: String) -> Outcome {
        if !self.transition(ticket, PipelineState::Failed(reason.clone())) {
            return Outcome::Superseded;
        }

        log::warn!("[{}] load {name} failed: {reason}", ticket.0);
        Outcome::Failed(reason)
    }

    /// Record `state` for `ticket`. Returns false if the ticket is stale.
    fn transition(&self, ticket: Ticket, state: PipelineState) -> bool {
        let mut current = lock(&self.inner.state);
        if !self.is_current(ticket) {
            return false;
        }

        *current = state;
        true
    }
}

async fn blocking<T, F>(f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> image_loader::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("worker task failed: {e}")),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_file(name: &str, width: u32, height: u32, pixel: [u8; 4]) -> SourceFile {
        let image = RgbaImage::from_pixel(width, height, Rgba(pixel));
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        SourceFile::new(name, "image/png", buf.into_inner())
    }

    fn surface_pixels(pipeline: &Pipeline) -> Raster {
        pipeline.with_surface(|s| s.read_pixels(0, 0, s.width(), s.height()).unwrap())
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let pipeline = Pipeline::new();
        let first = pipeline.begin();
        let second = pipeline.begin();

        assert!(second > first);
        assert!(!pipeline.is_current(first));
        assert!(pipeline.is_current(second));
    }

    #[tokio::test]
    async fn test_run_tints_white_image() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.state(), PipelineState::Idle);

        let outcome = pipeline.run(png_file("white.png", 2, 2, [255; 4])).await;
        assert_eq!(outcome, Outcome::Ready { width: 2, height: 2 });
        assert_eq!(pipeline.state(), PipelineState::Ready { width: 2, height: 2 });

        let pixels = surface_pixels(&pipeline);
        assert_eq!(pixels.samples(), [76, 255, 76, 255].repeat(4).as_slice());
    }

    #[tokio::test]
    async fn test_surface_matches_decoded_dimensions() {
        let pipeline = Pipeline::new();
        pipeline.run(png_file("a.png", 7, 3, [10, 20, 30, 40])).await;
        assert_eq!(pipeline.with_surface(|s| s.dimensions()), (7, 3));

        pipeline.run(png_file("b.png", 1, 5, [10, 20, 30, 40])).await;
        assert_eq!(pipeline.with_surface(|s| s.dimensions()), (1, 5));
        assert!(surface_pixels(&pipeline)
            .samples()
            .chunks_exact(4)
            .all(|p| p == [3, 20, 9, 40]));
    }

    #[tokio::test]
    async fn test_corrupt_file_fails() {
        let pipeline = Pipeline::new();
        let file = SourceFile::new("bad.png", "image/png", b"garbage".to_vec());

        let outcome = pipeline.run(file).await;
        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(matches!(pipeline.state(), PipelineState::Failed(_)));
        assert!(pipeline.with_surface(|s| s.is_empty()));
    }

    #[tokio::test]
    async fn test_stale_run_never_reaches_surface() {
        let pipeline = Pipeline::new();
        let stale = pipeline.begin();
        let latest = pipeline.begin();

        let outcome = pipeline
            .run_ticket(latest, png_file("new.png", 1, 1, [0, 0, 0, 255]))
            .await;
        assert_eq!(outcome, Outcome::Ready { width: 1, height: 1 });

        let outcome = pipeline
            .run_ticket(stale, png_file("old.png", 3, 3, [255; 4]))
            .await;
        assert_eq!(outcome, Outcome::Superseded);

        assert_eq!(pipeline.state(), PipelineState::Ready { width: 1, height: 1 });
        assert_eq!(surface_pixels(&pipeline).samples(), &[0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_concurrent_runs_latest_wins() {
        let pipeline = Pipeline::new();
        let runs = (1..=4u32).map(|n| {
            let pipeline = pipeline.clone();
            let file = png_file(&format!("{n}.png"), n, n, [255; 4]);
            let ticket = pipeline.begin();
            async move { pipeline.run_ticket(ticket, file).await }
        });

        let outcomes = futures::future::join_all(runs).await;
        assert_eq!(outcomes[3], Outcome::Ready { width: 4, height: 4 });
        assert!(outcomes[..3].iter().all(|o| *o == Outcome::Superseded));
        assert_eq!(pipeline.with_surface(|s| s.dimensions()), (4, 4));
    }
}
