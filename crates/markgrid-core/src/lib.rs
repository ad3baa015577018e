//! Core types for scanned answer-sheet grading.
//!
//! This crate is intentionally small: the page buffer, the shared identifier
//! and geometry records, and the logger. It does *not* depend on any concrete
//! mark detector or grading policy.

mod geom;
mod image;
mod logger;

pub use geom::{AnswerId, CheckboxSpec, PixelRect, QuestionId, TestId};
pub use image::PageImage;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
