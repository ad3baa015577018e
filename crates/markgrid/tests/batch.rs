use markgrid::{grade_batch, GradeError, PageImage, ScannedPage, TestConfig, TestId};

const CONFIG: &str = "\
mode: some
correct: 1
incorrect: 0.5
floor: 0
cell-size: 0.025
gray-level: 0.4
proportion: 0.5
margin: 0.3
ID-table: (0.85, 0.05)

*** ANSWERS (TEST 0) ***
1 -> 2
2 -> 3

*** BOXES (TEST 0) ***
QA-1 (False): page 1, position (0.1, 0.1)
QA-2 (True): page 1, position (0.18, 0.1)
QA-3 (False): page 1, position (0.26, 0.1)
QB-1 (False): page 2, position (0.1, 0.1)
QB-2 (False): page 2, position (0.18, 0.1)
QB-3 (True): page 2, position (0.26, 0.1)

*** ANSWERS (TEST 1) ***
1 -> 1
2 -> 1

*** BOXES (TEST 1) ***
QB-3 (True): page 1, position (0.1, 0.1)
QB-2 (False): page 1, position (0.18, 0.1)
QB-1 (False): page 1, position (0.26, 0.1)
QA-2 (True): page 2, position (0.1, 0.1)
QA-1 (False): page 2, position (0.18, 0.1)
QA-3 (False): page 2, position (0.26, 0.1)

*** STUDENTS LIST ***
Ada Lovelace
Charles Babbage

*** IDS LIST ***
0: Ada Lovelace
1: Charles Babbage
";

const SIZE: usize = 800;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fill_box(cfg: &TestConfig, img: &mut PageImage, id: TestId, question: &str, answer: u32) {
    let spec = cfg.boxes[&id]
        .iter()
        .find(|b| b.question == question && b.answer == answer)
        .expect("box exists");
    let side = (cfg.params.cell_size * SIZE as f64).round() as usize;
    let row = (spec.position.y * SIZE as f64).round() as usize;
    let col = (spec.position.x * SIZE as f64).round() as usize;
    for r in 0..side {
        for c in 0..side {
            img.set(row + r, col + c, 0.0);
        }
    }
}

fn scans(cfg: &TestConfig, marks: &[(TestId, &str, u32)]) -> Vec<ScannedPage> {
    let mut pages = Vec::new();
    for id in [0, 1] {
        for page in [1, 2] {
            let mut image = PageImage::white(SIZE, SIZE);
            for &(mid, q, a) in marks {
                let spec = &cfg.boxes[&mid]
                    .iter()
                    .find(|b| b.question == q && b.answer == a)
                    .unwrap();
                if mid == id && spec.page == page {
                    fill_box(cfg, &mut image, id, q, a);
                }
            }
            pages.push(ScannedPage { id, page, image });
        }
    }
    pages
}

#[test]
fn batch_grades_both_students_and_writes_artifacts() {
    init_logs();
    let cfg = TestConfig::parse(CONFIG).unwrap();
    // Ada checks A-2 (right) and B-1 (wrong); Charles checks B-3 (right).
    let pages = scans(
        &cfg,
        &[(0, "A", 2), (0, "B", 1), (1, "B", 3)],
    );

    let dir = tempfile::tempdir().unwrap();
    let report = grade_batch(&pages, &cfg, Some(dir.path()));

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.students.len(), 2);

    let ada = &report.students[0].result;
    assert_eq!(ada.id, 0);
    assert_eq!(ada.student.as_deref(), Some("Ada Lovelace"));
    assert_eq!(ada.scores["A"], 1.0);
    // Wrong mark on B: 0 - 0.5, floored at 0.
    assert_eq!(ada.scores["B"], 0.0);
    assert_eq!(ada.total, 1.0);

    let charles = &report.students[1].result;
    assert_eq!(charles.scores["B"], 1.0);
    assert_eq!(charles.total, 1.0);

    for student in &report.students {
        let path = student.artifact.as_ref().unwrap();
        assert!(path.exists());
        let artifact = image::open(path).unwrap().to_luma8();
        // Two stacked pages.
        assert_eq!(artifact.height() as usize, 2 * SIZE);
    }
}

#[test]
fn bad_page_isolates_its_sheet_only() {
    init_logs();
    let mut cfg = TestConfig::parse(CONFIG).unwrap();
    // Corrupt one recorded position of sheet 1 so it falls off the raster.
    cfg.boxes.get_mut(&1).unwrap()[0].position.x = 1.2;

    let pages = scans(&cfg, &[(0, "A", 2)]);
    let report = grade_batch(&pages, &cfg, None);

    assert_eq!(report.students.len(), 1);
    assert_eq!(report.students[0].result.id, 0);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.id, 1);
    assert!(matches!(failure.error, GradeError::BoxOutOfBounds { .. }));
}

#[test]
fn unmarked_sheets_score_zero_everywhere() {
    init_logs();
    let cfg = TestConfig::parse(CONFIG).unwrap();
    let pages = scans(&cfg, &[]);
    let report = grade_batch(&pages, &cfg, None);
    assert_eq!(report.students.len(), 2);
    for student in &report.students {
        assert_eq!(student.result.total, 0.0);
        assert!(student.result.checked.values().all(|set| set.is_empty()));
    }
}
