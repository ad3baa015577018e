use markgrid_config::TestConfig;
use markgrid_core::{CheckboxSpec, PageImage, PixelRect, TestId};
use markgrid_scan::test_square_color;

use crate::GradeError;

/// One checkbox of a page with its resolved pixel rectangle and observed
/// state.
#[derive(Clone, Debug)]
pub struct BoxReading {
    pub spec: CheckboxSpec,
    pub rect: PixelRect,
    pub checked: bool,
}

/// All checkbox observations of one scanned page.
#[derive(Clone, Debug)]
pub struct PageReading {
    pub id: TestId,
    pub page: u32,
    pub boxes: Vec<BoxReading>,
}

impl PageReading {
    /// Real `(question, answer)` pairs observed checked on this page.
    pub fn checked(&self) -> impl Iterator<Item = (&str, u32)> {
        self.boxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| (b.spec.question.as_str(), b.spec.answer))
    }
}

/// Pixel side length of a checkbox on this raster.
pub(crate) fn box_side(cfg: &TestConfig, image: &PageImage) -> usize {
    (cfg.params.cell_size * image.width as f64).round().max(1.0) as usize
}

/// Resolve a normalized box position to its pixel rectangle, or the
/// out-of-bounds error that aborts this page.
pub(crate) fn box_rect(
    cfg: &TestConfig,
    image: &PageImage,
    id: TestId,
    spec: &CheckboxSpec,
) -> Result<PixelRect, GradeError> {
    let side = box_side(cfg, image);
    let col = (spec.position.x * image.width as f64).round() as i64;
    let row = (spec.position.y * image.height as f64).round() as i64;
    let fits = row >= 0
        && col >= 0
        && row + side as i64 <= image.height as i64
        && col + side as i64 <= image.width as i64;
    if !fits {
        return Err(GradeError::BoxOutOfBounds {
            id,
            page: spec.page,
            question: spec.question.clone(),
            answer: spec.answer,
            row,
            col,
            width: image.width,
            height: image.height,
        });
    }
    Ok(PixelRect::new(row as isize, col as isize, side, side))
}

/// Classify every configured checkbox of `(id, page)` on the supplied raster.
///
/// Positions come from the configuration (already snapped to the printed
/// squares at generation time). A box that does not fit on the raster is a
/// data error: the whole page fails rather than silently dropping the box.
pub fn read_page(
    image: &PageImage,
    cfg: &TestConfig,
    id: TestId,
    page: u32,
) -> Result<PageReading, GradeError> {
    let proportion = cfg.params.proportion as f32;
    let gray_level = cfg.params.gray_level as f32;

    let mut boxes = Vec::new();
    for spec in cfg.page_boxes(id, page)? {
        let rect = box_rect(cfg, image, id, spec)?;
        let checked = test_square_color(
            image,
            rect.top,
            rect.left,
            rect.width,
            proportion,
            gray_level,
        );
        boxes.push(BoxReading {
            spec: spec.clone(),
            rect,
            checked,
        });
    }
    log::debug!(
        "test {id} page {page}: {} of {} boxes checked",
        boxes.iter().filter(|b| b.checked).count(),
        boxes.len()
    );
    Ok(PageReading { id, page, boxes })
}
