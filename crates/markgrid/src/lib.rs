//! Optical mark recognition grading for shuffled multiple-choice sheets.
//!
//! Entry point crate: re-exports the scanner, configuration model, decision
//! engine and renderer, and offers [`grade_batch`] as the one-call pipeline
//! from scanned rasters plus a [`TestConfig`] to scored, annotated artifacts.
//!
//! The crate is a pure transform: no CLI, no network. An external driver owns
//! argument parsing, rasterization and delivery.

mod pipeline;

pub use pipeline::{grade_batch, BatchReport, GradedStudent, PageFailure, ScannedPage};

pub use markgrid_config::{ConfigError, Parameters, Shuffle, TestConfig};
pub use markgrid_core::{
    init_with_level, AnswerId, CheckboxSpec, PageImage, PixelRect, QuestionId, TestId,
};
pub use markgrid_grade::{
    annotate_page, collate_pages, read_page, score_student, write_artifact, BoxReading,
    GradeError, GradingResult, PageReading, RenderedPage,
};
pub use markgrid_scan::{
    eval_square_color, find_black_rectangle, find_black_square, find_lonely_square,
    test_square_color, Axis, DebugSession, ScanError, ScanOrder, SquareScanParams,
};

#[cfg(feature = "tracing")]
pub use markgrid_core::init_tracing;
