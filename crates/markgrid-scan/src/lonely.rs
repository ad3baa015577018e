use markgrid_core::PageImage;

use crate::color::eval_square_color;
use crate::detect::find_black_square;
use crate::params::{ScanOrder, SquareScanParams};

/// A neighbor darker than this fraction of the candidate's own blackness
/// disqualifies it from being lonely.
const NEIGHBOR_FRACTION: f32 = 0.5;

/// First detected square whose eight same-size neighbor windows (±size on
/// each axis and diagonal) are all substantially whiter than the square
/// itself.
///
/// Calibration marks sit alone in the page margin; answer checkboxes sit in
/// dense grids where at least one neighbor window is also inked, so this
/// isolates the former from the latter. Returns `None` when no isolated
/// square exists.
pub fn find_lonely_square(
    image: &PageImage,
    size: usize,
    params: SquareScanParams,
    order: ScanOrder,
) -> Option<(usize, usize)> {
    let s = size as isize;
    for (row, col) in find_black_square(image, size, params, order) {
        let own = eval_square_color(image, row as isize, col as isize, size, params.gray_level);
        let lonely = NEIGHBOR_OFFSETS.iter().all(|&(dr, dc)| {
            let score = eval_square_color(
                image,
                row as isize + dr * s,
                col as isize + dc * s,
                size,
                params.gray_level,
            );
            score < NEIGHBOR_FRACTION * own
        });
        if lonely {
            return Some((row, col));
        }
        log::debug!("square at ({row}, {col}) has inked neighbors, not a calibration mark");
    }
    None
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
