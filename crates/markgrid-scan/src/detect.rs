use markgrid_core::{PageImage, PixelRect};

use crate::adjust::adjust_window;
use crate::debug_session::DebugSession;
use crate::params::{ScanOrder, SquareScanParams};

/// Lazy, finite stream of accepted `width × height` black-rectangle corners.
///
/// Each call to [`find_black_rectangle`] builds a fresh, independently
/// restartable stream; dropping it early is safe. Every accepted corner
/// records an exclusion rectangle (square extended by the `error` margin) and
/// later candidates falling inside one, or whose own rectangle would overlap
/// one, are skipped — accepted rectangles are pairwise disjoint.
pub struct BlackRectangles<'a> {
    img: &'a PageImage,
    width: usize,
    height: usize,
    params: SquareScanParams,
    order: ScanOrder,
    /// Candidate rows × cols where the window still fits on the page.
    rows: usize,
    cols: usize,
    cursor: usize,
    min_ink: usize,
    exclusions: Vec<PixelRect>,
    debug: Option<&'a mut DebugSession>,
}

/// Search `image` for `width × height` rectangles of ink, top-left corners
/// yielded in traversal order.
pub fn find_black_rectangle<'a>(
    image: &'a PageImage,
    width: usize,
    height: usize,
    params: SquareScanParams,
    order: ScanOrder,
) -> BlackRectangles<'a> {
    let rows = image.height.saturating_sub(height.saturating_sub(1));
    let cols = image.width.saturating_sub(width.saturating_sub(1));
    let min_ink = ((1.0 - params.error) * (width * height) as f32).ceil() as usize;
    BlackRectangles {
        img: image,
        width,
        height,
        params,
        order,
        rows,
        cols,
        cursor: 0,
        min_ink,
        exclusions: Vec::new(),
        debug: None,
    }
}

/// `width == height` specialization of [`find_black_rectangle`].
pub fn find_black_square(
    image: &PageImage,
    size: usize,
    params: SquareScanParams,
    order: ScanOrder,
) -> BlackRectangles<'_> {
    find_black_rectangle(image, size, size, params, order)
}

impl<'a> BlackRectangles<'a> {
    /// Attach a scoped debug recorder; detection events are appended to it.
    pub fn with_debug(mut self, session: &'a mut DebugSession) -> Self {
        self.debug = Some(session);
        self
    }

    /// Exclusion rectangles recorded so far.
    pub fn exclusions(&self) -> &[PixelRect] {
        &self.exclusions
    }

    fn window_ink(&self, row: usize, col: usize) -> usize {
        let mut count = 0;
        for r in 0..self.height as isize {
            for c in 0..self.width as isize {
                if self
                    .img
                    .ink(row as isize + r, col as isize + c, self.params.gray_level)
                {
                    count += 1;
                }
            }
        }
        count
    }

    fn exclusion_for(&self, row: isize, col: isize) -> PixelRect {
        let margin_r = (self.params.error * self.height as f32).round() as isize;
        let margin_c = (self.params.error * self.width as f32).round() as isize;
        PixelRect::new(
            row - margin_r,
            col - margin_c,
            self.height + 2 * margin_r.max(0) as usize,
            self.width + 2 * margin_c.max(0) as usize,
        )
    }
}

impl Iterator for BlackRectangles<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let end = self.rows * self.cols;
        while self.cursor < end {
            let (row, col) = self.order.position(self.cursor, self.rows, self.cols);
            self.cursor += 1;

            if !self.img.ink(row as isize, col as isize, self.params.gray_level) {
                continue;
            }
            if self
                .exclusions
                .iter()
                .any(|zone| zone.contains(row as isize, col as isize))
            {
                continue;
            }
            if self.window_ink(row, col) < self.min_ink {
                continue;
            }

            let out = adjust_window(
                self.img,
                row,
                col,
                self.width,
                self.height,
                self.params.error,
                self.params.gray_level,
            );
            let zone = self.exclusion_for(out.row, out.col);
            if self.exclusions.iter().any(|z| z.intersects(&zone)) {
                log::debug!(
                    "candidate at ({}, {}) overlaps an accepted square, skipped",
                    out.row,
                    out.col
                );
                continue;
            }
            self.exclusions.push(zone);

            // Adjusted corners stay on the page: drift is bounded by the
            // error margin, which the config keeps well under the page size.
            let accepted = (out.row.max(0) as usize, out.col.max(0) as usize);
            if let Some(session) = self.debug.as_deref_mut() {
                session.record_accept(accepted.0, accepted.1, zone);
                if out.capped {
                    session.record_drift(row, col, accepted.0, accepted.1, out.iterations);
                }
            }
            return Some(accepted);
        }
        None
    }
}
