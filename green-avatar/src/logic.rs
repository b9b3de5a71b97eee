//! Upload, tint and download logic
//!
//! The [`Shell`] is the entry point: front ends forward picker selections,
//! drag gestures and download requests to it.

pub mod download;
pub mod pipeline;
pub mod shell;

pub use download::OutputArtifact;
pub use pipeline::{Outcome, Pipeline, PipelineState};
pub use shell::{Shell, Submission, UiState};
