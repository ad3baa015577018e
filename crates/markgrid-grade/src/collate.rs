use std::path::{Path, PathBuf};

use markgrid_core::{PageImage, TestId};

use crate::annotate::RenderedPage;
use crate::GradeError;

/// Concatenate a student's annotated pages into one artifact.
///
/// Pages are ordered by the smallest *apparent* question number they display
/// (generation order may differ from display order) and stacked vertically,
/// padded to the widest page with white.
pub fn collate_pages(mut pages: Vec<RenderedPage>) -> PageImage {
    pages.sort_by_key(|p| (p.first_apparent, p.page));

    let width = pages.iter().map(|p| p.image.width).max().unwrap_or(0);
    let height: usize = pages.iter().map(|p| p.image.height).sum();
    let mut out = PageImage::white(width, height);

    let mut offset = 0;
    for page in &pages {
        for r in 0..page.image.height {
            for c in 0..page.image.width {
                out.set(offset + r, c, page.image.get(r as isize, c as isize));
            }
        }
        offset += page.image.height;
    }
    out
}

fn artifact_name(student: Option<&str>, id: TestId) -> String {
    let base = student.unwrap_or("unknown");
    let safe: String = base
        .chars()
        .map(|c| if c.is_whitespace() || c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}-{id}.png")
}

/// Write the collated artifact into `dir`, named by student and id.
pub fn write_artifact(
    dir: impl AsRef<Path>,
    student: Option<&str>,
    id: TestId,
    artifact: &PageImage,
) -> Result<PathBuf, GradeError> {
    let path = dir.as_ref().join(artifact_name(student, id));
    artifact.to_luma8().save(&path)?;
    log::info!("wrote {}", path.display());
    Ok(path)
}
