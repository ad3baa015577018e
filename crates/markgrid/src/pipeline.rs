use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use markgrid_config::TestConfig;
use markgrid_core::{PageImage, TestId};
use markgrid_grade::{
    annotate_page, collate_pages, read_page, score_student, write_artifact, GradeError,
    GradingResult,
};

/// One rasterized page handed over by the external scanner.
#[derive(Clone, Debug)]
pub struct ScannedPage {
    pub id: TestId,
    pub page: u32,
    pub image: PageImage,
}

/// A page or sheet that could not be graded. The rest of the batch is
/// unaffected; the driver decides whether to rescan.
#[derive(Debug)]
pub struct PageFailure {
    pub id: TestId,
    /// Page that failed, or `None` when the sheet failed as a whole.
    pub page: Option<u32>,
    pub error: GradeError,
}

/// One fully graded student.
#[derive(Debug)]
pub struct GradedStudent {
    pub result: GradingResult,
    /// Collated artifact path, when an output directory was given.
    pub artifact: Option<PathBuf>,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub students: Vec<GradedStudent>,
    pub failures: Vec<PageFailure>,
}

/// Grade a batch of scanned pages against one configuration.
///
/// Pages are grouped by test id; each sheet is read, scored, annotated and
/// collated independently of the others (the configuration is the only shared
/// state, and it is read-only). A failing page isolates its own sheet and is
/// reported in the returned [`BatchReport`]; it never blocks the batch.
pub fn grade_batch(
    pages: &[ScannedPage],
    cfg: &TestConfig,
    out_dir: Option<&Path>,
) -> BatchReport {
    let mut by_id: BTreeMap<TestId, Vec<&ScannedPage>> = BTreeMap::new();
    for page in pages {
        by_id.entry(page.id).or_default().push(page);
    }

    let mut report = BatchReport::default();
    'sheets: for (id, sheet_pages) in by_id {
        let mut readings = Vec::new();
        for scan in &sheet_pages {
            match read_page(&scan.image, cfg, id, scan.page) {
                Ok(reading) => readings.push(reading),
                Err(error) => {
                    log::warn!("test {id} page {}: {error}", scan.page);
                    report.failures.push(PageFailure {
                        id,
                        page: Some(scan.page),
                        error,
                    });
                    continue 'sheets;
                }
            }
        }

        let result = match score_student(cfg, id, &readings) {
            Ok(result) => result,
            Err(error) => {
                log::warn!("test {id}: {error}");
                report.failures.push(PageFailure {
                    id,
                    page: None,
                    error,
                });
                continue;
            }
        };

        let mut rendered = Vec::new();
        let mut render_failed = false;
        for (scan, reading) in sheet_pages.iter().zip(&readings) {
            match annotate_page(&scan.image, cfg, id, reading, &result) {
                Ok(page) => rendered.push(page),
                Err(error) => {
                    report.failures.push(PageFailure {
                        id,
                        page: Some(scan.page),
                        error,
                    });
                    render_failed = true;
                    break;
                }
            }
        }
        if render_failed {
            continue;
        }

        let artifact = match out_dir {
            None => None,
            Some(dir) => {
                let collated = collate_pages(rendered);
                match write_artifact(dir, result.student.as_deref(), id, &collated) {
                    Ok(path) => Some(path),
                    Err(error) => {
                        report.failures.push(PageFailure {
                            id,
                            page: None,
                            error,
                        });
                        continue;
                    }
                }
            }
        };

        log::info!(
            "test {id}: total {} over {} questions",
            result.total,
            result.scores.len()
        );
        report.students.push(GradedStudent { result, artifact });
    }
    report
}
