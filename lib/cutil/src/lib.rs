//! # CUtil - Common Utilities Library
//!
//! A collection of small utility modules shared by the workspace crates.
//!
//! ## Features
//!
//! - `time`: Time utilities (local clock formatting, compact ISO-8601 stamps)

#[cfg(feature = "time")]
pub mod time;
