//! Geometry scanner: pixel-grid search for black rectangles on scanned pages.
//!
//! The detectors here locate calibration marks and checkbox squares in a
//! [`markgrid_core::PageImage`]. Detection is a pure function of one image
//! buffer: no shared state, safe to run per page across worker threads with
//! no coordination.

mod adjust;
mod color;
mod debug_session;
mod detect;
mod lonely;
mod params;

pub use color::{eval_square_color, ink_ratio, test_square_color};
pub use debug_session::{AcceptedSquare, DebugSession, DriftEvent};
pub use detect::{find_black_rectangle, find_black_square, BlackRectangles};
pub use lonely::find_lonely_square;
pub use params::{Axis, ScanOrder, SquareScanParams};

/// Errors raised by scanner entry points.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("contradictory scan order: outer and inner traversal both follow {0:?}")]
    ContradictoryOrder(Axis),
}
