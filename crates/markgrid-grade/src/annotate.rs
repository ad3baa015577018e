use std::collections::BTreeMap;

use markgrid_config::TestConfig;
use markgrid_core::{PageImage, PixelRect, TestId};

use crate::font::{draw_text, format_score, text_width, GLYPH_HEIGHT};
use crate::read::PageReading;
use crate::score::GradingResult;
use crate::GradeError;

const OUTLINE: f32 = 0.5;
const MARK: f32 = 0.0;

/// One annotated page, tagged with the smallest apparent question number it
/// displays so the collator can restore display order.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub page: u32,
    pub first_apparent: usize,
    pub image: PageImage,
}

fn draw_rect_outline(img: &mut PageImage, rect: &PixelRect, value: f32) {
    let (top, left) = (rect.top.max(0) as usize, rect.left.max(0) as usize);
    for c in 0..rect.width {
        img.set(top, left + c, value);
        img.set(top + rect.height - 1, left + c, value);
    }
    for r in 0..rect.height {
        img.set(top + r, left, value);
        img.set(top + r, left + rect.width - 1, value);
    }
}

fn draw_circle(img: &mut PageImage, center_row: f64, center_col: f64, radius: f64, value: f32) {
    let r0 = (center_row - radius - 1.0).floor() as isize;
    let r1 = (center_row + radius + 1.0).ceil() as isize;
    let c0 = (center_col - radius - 1.0).floor() as isize;
    let c1 = (center_col + radius + 1.0).ceil() as isize;
    for r in r0..=r1 {
        for c in c0..=c1 {
            if r < 0 || c < 0 {
                continue;
            }
            let dr = r as f64 - center_row;
            let dc = c as f64 - center_col;
            if ((dr * dr + dc * dc).sqrt() - radius).abs() <= 1.0 {
                img.set(r as usize, c as usize, value);
            }
        }
    }
}

fn draw_cross(img: &mut PageImage, rect: &PixelRect, value: f32) {
    let (top, left) = (rect.top.max(0) as usize, rect.left.max(0) as usize);
    let side = rect.width.min(rect.height);
    for i in 0..side {
        img.set(top + i, left + i, value);
        img.set(top + i, left + side - 1 - i, value);
        // Doubled for visibility on low-resolution scans.
        if i + 1 < side {
            img.set(top + i + 1, left + i, value);
            img.set(top + i + 1, left + side - 1 - i, value);
        }
    }
}

/// Draw grading feedback onto a copy of the scanned page.
///
/// Every configured box gets an outline; boxes checked against the key get a
/// circle; correct answers left unchecked get a cross; each question's score
/// is written beside its top-left-most box on the page.
pub fn annotate_page(
    image: &PageImage,
    cfg: &TestConfig,
    id: TestId,
    reading: &PageReading,
    result: &GradingResult,
) -> Result<RenderedPage, GradeError> {
    let mut out = image.clone();

    for b in &reading.boxes {
        draw_rect_outline(&mut out, &b.rect, OUTLINE);
        let correct = result.correct[&b.spec.question].contains(&b.spec.answer);
        if b.checked && !correct {
            let center_row = b.rect.top as f64 + b.rect.height as f64 / 2.0;
            let center_col = b.rect.left as f64 + b.rect.width as f64 / 2.0;
            draw_circle(&mut out, center_row, center_col, 0.8 * b.rect.width as f64, MARK);
        } else if !b.checked && correct {
            draw_cross(&mut out, &b.rect, MARK);
        }
    }

    // Top-left-most box of every question present on this page.
    let mut anchors: BTreeMap<&str, &PixelRect> = BTreeMap::new();
    for b in &reading.boxes {
        let entry = anchors.entry(b.spec.question.as_str()).or_insert(&b.rect);
        if (b.rect.top, b.rect.left) < ((*entry).top, (*entry).left) {
            *entry = &b.rect;
        }
    }

    let mut first_apparent = usize::MAX;
    for (question, rect) in &anchors {
        let (apparent, _) = cfg.real_to_apparent(id, question, None)?;
        first_apparent = first_apparent.min(apparent);

        let text = format_score(result.scores[*question]);
        let scale = (rect.width / 8).max(1);
        let width = text_width(&text, scale);
        let top = rect.top.max(0) as usize;
        let left = rect.left.max(0) as usize;
        if left >= width + rect.width {
            draw_text(&mut out, top, left - (width + rect.width), &text, scale, MARK);
        } else {
            // No room beside a box at the left edge: label above it instead.
            let row = top.saturating_sub(GLYPH_HEIGHT * scale + rect.width);
            draw_text(&mut out, row, left, &text, scale, MARK);
        }
    }

    Ok(RenderedPage {
        page: reading.page,
        first_apparent,
        image: out,
    })
}
