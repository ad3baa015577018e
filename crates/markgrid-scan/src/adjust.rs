use markgrid_core::PageImage;

/// Hard cap on corner-correction iterations. Termination safety valve only:
/// a capped position is "did not diverge", not provably optimal.
pub(crate) const ADJUST_MAX_ITERS: u32 = 100;

/// Outcome of the corner correction for one accepted window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AdjustOutcome {
    pub row: isize,
    pub col: isize,
    pub iterations: u32,
    pub capped: bool,
}

fn column_ink(img: &PageImage, top: isize, col: isize, height: usize, gray_level: f32) -> usize {
    (0..height as isize)
        .filter(|&r| img.ink(top + r, col, gray_level))
        .count()
}

fn row_ink(img: &PageImage, row: isize, left: isize, width: usize, gray_level: f32) -> usize {
    (0..width as isize)
        .filter(|&c| img.ink(row, left + c, gray_level))
        .count()
}

/// Nudge the accepted `width × height` window so it sits on the printed
/// square instead of merely overlapping it.
///
/// Per axis: shift while the strip just outside the leading edge clears the
/// `(1 - error)` ink threshold and the trailing edge does not, i.e. the
/// window gains an inked strip and sheds a white one. Drift is bounded to an
/// `error` fraction of the side per axis; the iteration cap stops pathological
/// inputs. Never fails — the caller keeps the best-effort position.
pub(crate) fn adjust_window(
    img: &PageImage,
    row0: usize,
    col0: usize,
    width: usize,
    height: usize,
    error: f32,
    gray_level: f32,
) -> AdjustOutcome {
    let per_col = ((1.0 - error) * height as f32).ceil() as usize;
    let per_line = ((1.0 - error) * width as f32).ceil() as usize;
    let max_dc = (error * width as f32).round() as isize;
    let max_dr = (error * height as f32).round() as isize;

    let (row0, col0) = (row0 as isize, col0 as isize);
    let mut row = row0;
    let mut col = col0;
    let w = width as isize;
    let h = height as isize;

    let mut iterations = 0;
    let mut capped = false;
    loop {
        if iterations >= ADJUST_MAX_ITERS {
            capped = true;
            log::warn!(
                "corner correction hit the {ADJUST_MAX_ITERS}-iteration cap at \
                 ({row0}, {col0}); keeping best-effort position ({row}, {col})"
            );
            break;
        }
        iterations += 1;
        let mut moved = false;

        // Column axis.
        if col - col0 < max_dc
            && column_ink(img, row, col + w, height, gray_level) >= per_col
            && column_ink(img, row, col, height, gray_level) < per_col
        {
            col += 1;
            moved = true;
        } else if col0 - col < max_dc
            && column_ink(img, row, col - 1, height, gray_level) >= per_col
            && column_ink(img, row, col + w - 1, height, gray_level) < per_col
        {
            col -= 1;
            moved = true;
        }

        // Row axis.
        if row - row0 < max_dr
            && row_ink(img, row + h, col, width, gray_level) >= per_line
            && row_ink(img, row, col, width, gray_level) < per_line
        {
            row += 1;
            moved = true;
        } else if row0 - row < max_dr
            && row_ink(img, row - 1, col, width, gray_level) >= per_line
            && row_ink(img, row + h - 1, col, width, gray_level) < per_line
        {
            row -= 1;
            moved = true;
        }

        if !moved {
            break;
        }
    }

    AdjustOutcome {
        row,
        col,
        iterations,
        capped,
    }
}
