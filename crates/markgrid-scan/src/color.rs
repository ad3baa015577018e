use markgrid_core::PageImage;

/// Inset of the eroded core on each side, in pixels.
const CORE_MARGIN: isize = 2;

/// Fraction of ink pixels in the `height × width` window rooted at
/// `(top, left)`. Pixels outside the page read as white. Empty windows
/// score 0.
pub fn ink_ratio(
    img: &PageImage,
    top: isize,
    left: isize,
    height: usize,
    width: usize,
    gray_level: f32,
) -> f32 {
    let total = height * width;
    if total == 0 {
        return 0.0;
    }
    let mut count = 0usize;
    for r in 0..height as isize {
        for c in 0..width as isize {
            if img.ink(top + r, left + c, gray_level) {
                count += 1;
            }
        }
    }
    count as f32 / total as f32
}

/// Is the `size × size` square at `(row, col)` filled with ink?
///
/// Both the whole square's ink ratio and its 2-pixel-eroded core's ink ratio
/// must exceed `proportion`, so a hollow ink ring with an empty core is
/// rejected no matter how dark its border is. Squares too small to have a
/// core are judged on the whole window alone.
pub fn test_square_color(
    img: &PageImage,
    row: isize,
    col: isize,
    size: usize,
    proportion: f32,
    gray_level: f32,
) -> bool {
    let full = ink_ratio(img, row, col, size, size, gray_level);
    if full <= proportion {
        return false;
    }
    let core = size as isize - 2 * CORE_MARGIN;
    if core <= 0 {
        return true;
    }
    let core = core as usize;
    ink_ratio(
        img,
        row + CORE_MARGIN,
        col + CORE_MARGIN,
        core,
        core,
        gray_level,
    ) > proportion
}

/// Continuous blackness score in `[0, 1]` for the `size × size` square at
/// `(row, col)`, weighting the eroded core three times the full window.
///
/// Used to pick the blackest among ambiguous candidates; monotonic in the
/// core ink density at fixed border density.
pub fn eval_square_color(
    img: &PageImage,
    row: isize,
    col: isize,
    size: usize,
    gray_level: f32,
) -> f32 {
    let full = ink_ratio(img, row, col, size, size, gray_level);
    let core_side = size as isize - 2 * CORE_MARGIN;
    let core = if core_side > 0 {
        ink_ratio(
            img,
            row + CORE_MARGIN,
            col + CORE_MARGIN,
            core_side as usize,
            core_side as usize,
            gray_level,
        )
    } else {
        full
    };
    (3.0 * core + full) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, paint: impl Fn(usize, usize) -> f32) -> PageImage {
        let mut img = PageImage::white(size + 8, size + 8);
        for r in 0..size {
            for c in 0..size {
                img.set(4 + r, 4 + c, paint(r, c));
            }
        }
        img
    }

    fn is_border(r: usize, c: usize, size: usize) -> bool {
        r < 2 || c < 2 || r >= size - 2 || c >= size - 2
    }

    #[test]
    fn filled_square_passes() {
        let img = square(12, |_, _| 0.0);
        assert!(test_square_color(&img, 4, 4, 12, 0.8, 0.5));
    }

    #[test]
    fn hollow_ring_fails_even_at_high_proportion() {
        // Inked 2-px border, empty eroded core.
        let img = square(12, |r, c| if is_border(r, c, 12) { 0.0 } else { 1.0 });
        assert!(!test_square_color(&img, 4, 4, 12, 0.3, 0.5));
        // The ring alone is well above the proportion, so only the core
        // test can be rejecting it.
        assert!(ink_ratio(&img, 4, 4, 12, 12, 0.5) > 0.3);
    }

    #[test]
    fn eval_is_monotonic_in_core_density() {
        let size = 12;
        let mut prev = -1.0f32;
        for filled in 0..=8 {
            // Fixed fully-inked border, progressively inked core rows.
            let img = square(size, |r, c| {
                if is_border(r, c, size) {
                    0.0
                } else if r - 2 < filled {
                    0.0
                } else {
                    1.0
                }
            });
            let score = eval_square_color(&img, 4, 4, size, 0.5);
            assert!(
                score > prev,
                "score {score} did not increase at {filled} core rows"
            );
            prev = score;
        }
    }

    #[test]
    fn tiny_square_falls_back_to_full_window() {
        let img = square(3, |_, _| 0.0);
        assert!(test_square_color(&img, 4, 4, 3, 0.8, 0.5));
        approx::assert_abs_diff_eq!(eval_square_color(&img, 4, 4, 3, 0.5), 1.0, epsilon = 1e-6);
    }
}
