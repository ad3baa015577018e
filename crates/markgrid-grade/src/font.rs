//! Built-in 3×5 glyphs for score labels.
//!
//! The renderer works on bare grayscale buffers, so score text is drawn from
//! this tiny bitmap set instead of pulling in a font rasterizer.

use markgrid_core::PageImage;

pub(crate) const GLYPH_HEIGHT: usize = 5;
pub(crate) const GLYPH_WIDTH: usize = 3;

/// Rows top to bottom, highest bit = leftmost column.
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0b000; GLYPH_HEIGHT],
    }
}

/// Pixel width of `text` at the given scale, including inter-glyph gaps.
pub(crate) fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    n * (GLYPH_WIDTH + 1) * scale - scale
}

/// Draw `text` with its top-left corner at `(row, col)`.
pub(crate) fn draw_text(
    img: &mut PageImage,
    row: usize,
    col: usize,
    text: &str,
    scale: usize,
    value: f32,
) {
    let mut cursor = col;
    for ch in text.chars() {
        let rows = glyph(ch);
        for (gr, bits) in rows.iter().enumerate() {
            for gc in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - gc)) == 0 {
                    continue;
                }
                for dr in 0..scale {
                    for dc in 0..scale {
                        img.set(row + gr * scale + dr, cursor + gc * scale + dc, value);
                    }
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}

/// Render a score: whole values lose the fraction, others keep two decimals.
pub(crate) fn format_score(score: f64) -> String {
    if (score - score.round()).abs() < 1e-9 {
        format!("{}", score.round() as i64)
    } else {
        format!("{score:.2}")
    }
}
