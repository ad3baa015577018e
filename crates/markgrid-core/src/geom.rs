use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Per-student sheet identifier (one shuffled test per id).
pub type TestId = u32;

/// Canonical (pre-shuffle) question label, e.g. `"A1"` or `"17"`.
pub type QuestionId = String;

/// Canonical (pre-shuffle) 1-based answer index within a question.
pub type AnswerId = u32;

/// Integer pixel rectangle, used for exclusion zones around accepted squares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub top: isize,
    pub left: isize,
    pub height: usize,
    pub width: usize,
}

impl PixelRect {
    pub fn new(top: isize, left: isize, height: usize, width: usize) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    #[inline]
    pub fn bottom(&self) -> isize {
        self.top + self.height as isize
    }

    #[inline]
    pub fn right(&self) -> isize {
        self.left + self.width as isize
    }

    #[inline]
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= self.top && row < self.bottom() && col >= self.left && col < self.right()
    }

    #[inline]
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Where a checkbox is expected on a generated sheet.
///
/// Produced at generation time (after the scanner has snapped the printed
/// square), persisted in the test configuration and read back at grading
/// time. Positions are normalized to `[0, 1]` page coordinates, top-left
/// origin; the side length is a single per-config scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckboxSpec {
    /// 1-based page number within the student's sheet.
    pub page: u32,
    pub question: QuestionId,
    pub answer: AnswerId,
    /// Expected correctness recorded at generation time.
    pub correct: bool,
    /// Normalized top-left position `(x, y)`.
    pub position: Point2<f64>,
}
