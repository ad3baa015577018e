use serde::{Deserialize, Serialize};

use crate::ScanError;

/// Traversal axis of the pixel grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Rows,
    Cols,
}

/// Traversal order of the pixel grid: `outer` is walked once, `inner` is
/// walked for every outer step. Requesting the same axis twice is the
/// contradictory case and fails at the call site.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScanOrder {
    outer: Axis,
    inner: Axis,
}

impl ScanOrder {
    pub fn new(outer: Axis, inner: Axis) -> Result<Self, ScanError> {
        if outer == inner {
            return Err(ScanError::ContradictoryOrder(outer));
        }
        Ok(Self { outer, inner })
    }

    /// Top-to-bottom, left-to-right.
    pub fn row_major() -> Self {
        Self {
            outer: Axis::Rows,
            inner: Axis::Cols,
        }
    }

    /// Left-to-right, top-to-bottom.
    pub fn col_major() -> Self {
        Self {
            outer: Axis::Cols,
            inner: Axis::Rows,
        }
    }

    pub fn outer(&self) -> Axis {
        self.outer
    }

    /// Map a linear traversal index to `(row, col)` given the candidate
    /// ranges `rows × cols`.
    #[inline]
    pub(crate) fn position(&self, idx: usize, rows: usize, cols: usize) -> (usize, usize) {
        match self.outer {
            Axis::Rows => (idx / cols, idx % cols),
            Axis::Cols => (idx % rows, idx / rows),
        }
    }
}

/// Tuning knobs shared by the square detectors.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SquareScanParams {
    /// Tolerated fraction of non-ink pixels inside an accepted window; also
    /// bounds the per-axis drift of the corner correction and sizes the
    /// exclusion margin.
    pub error: f32,
    /// Intensities below this are "ink".
    pub gray_level: f32,
}

impl Default for SquareScanParams {
    fn default() -> Self {
        Self {
            error: 0.3,
            gray_level: 0.4,
        }
    }
}
