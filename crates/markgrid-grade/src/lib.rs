//! Decision engine and annotation renderer.
//!
//! The decision engine classifies every configured checkbox of a scanned page
//! as checked or unchecked at its *recorded* position (positions are
//! authoritative from the configuration; nothing is re-detected at grading
//! time), translates the observations back to real answer indices and scores
//! each question with the configured weights. The renderer draws the feedback
//! marks and collates a student's pages into one artifact.
//!
//! Everything here is stateless across invocations; pages of different
//! students can be processed concurrently with a shared `&TestConfig`.

mod annotate;
mod collate;
mod font;
mod read;
mod score;

#[cfg(test)]
pub(crate) mod tests_support;

pub use annotate::{annotate_page, RenderedPage};
pub use collate::{collate_pages, write_artifact};
pub use read::{read_page, BoxReading, PageReading};
pub use score::{score_student, GradingResult};

use markgrid_core::{AnswerId, QuestionId, TestId};

/// Errors raised while grading or rendering.
#[derive(thiserror::Error, Debug)]
pub enum GradeError {
    /// A configured box does not fit on the supplied raster; the whole page
    /// fails.
    #[error(
        "test {id} page {page}: box Q{question}-{answer} at pixel ({row}, {col}) \
         does not fit a {width}x{height} page"
    )]
    BoxOutOfBounds {
        id: TestId,
        page: u32,
        question: QuestionId,
        answer: AnswerId,
        row: i64,
        col: i64,
        width: usize,
        height: usize,
    },
    /// A page required for scoring was never read.
    #[error("test {id}: page {page} was not read, cannot score")]
    MissingPage { id: TestId, page: u32 },
    #[error(transparent)]
    Config(#[from] markgrid_config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
