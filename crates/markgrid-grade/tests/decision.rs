use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;

use markgrid_config::{Parameters, Shuffle, TestConfig};
use markgrid_core::{CheckboxSpec, PageImage};
use markgrid_grade::{read_page, score_student};

/// 19 questions with mixed labels, five answers each, one sheet in
/// generation order.
fn nineteen_question_config() -> TestConfig {
    let mut labels: Vec<String> = ["A1", "A2", "B1", "B2", "C", "D", "E1", "E2", "E3"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    labels.extend((10..20).map(|n| n.to_string()));
    assert_eq!(labels.len(), 19);

    let answers: Vec<u32> = (1..=5).collect();
    let correct_answers: BTreeMap<String, BTreeSet<u32>> = labels
        .iter()
        .map(|q| (q.clone(), BTreeSet::from([1])))
        .collect();

    let shuffle = Shuffle {
        questions: labels.clone(),
        answers: labels.iter().map(|q| (q.clone(), answers.clone())).collect(),
    };

    let mut sheet = Vec::new();
    for (qi, question) in labels.iter().enumerate() {
        for (ai, &answer) in answers.iter().enumerate() {
            sheet.push(CheckboxSpec {
                page: 1,
                question: question.clone(),
                answer,
                correct: answer == 1,
                position: Point2::new(0.05 + 0.06 * ai as f64, 0.05 + 0.045 * qi as f64),
            });
        }
    }

    TestConfig {
        params: Parameters::default(),
        id_table: Point2::new(0.85, 0.02),
        shuffles: [(0, shuffle)].into(),
        correct_answers,
        boxes: [(0, sheet)].into(),
        students: vec![],
        ids: BTreeMap::new(),
    }
}

fn fill_box(cfg: &TestConfig, img: &mut PageImage, question: &str, answer: u32) {
    let spec = cfg.boxes[&0]
        .iter()
        .find(|b| b.question == question && b.answer == answer)
        .expect("box exists");
    let side = (cfg.params.cell_size * img.width as f64).round() as usize;
    let row = (spec.position.y * img.height as f64).round() as usize;
    let col = (spec.position.x * img.width as f64).round() as usize;
    for r in 0..side {
        for c in 0..side {
            img.set(row + r, col + c, 0.0);
        }
    }
}

#[test]
fn marking_one_box_yields_exactly_that_real_pair() {
    let cfg = nineteen_question_config();
    let mut img = PageImage::white(1000, 1000);
    fill_box(&cfg, &mut img, "A1", 3);

    let reading = read_page(&img, &cfg, 0, 1).unwrap();
    let result = score_student(&cfg, 0, &[reading]).unwrap();

    assert_eq!(result.checked["A1"], BTreeSet::from([3]));
    let marked: Vec<_> = result
        .checked
        .iter()
        .filter(|(_, set)| !set.is_empty())
        .map(|(q, _)| q.as_str())
        .collect();
    assert_eq!(marked, ["A1"]);

    // One incorrect mark, nothing correct checked: total stays at the floor.
    assert_eq!(result.total, 0.0);
    assert_eq!(result.scores.len(), 19);
}

#[test]
fn half_filled_box_is_not_checked() {
    let cfg = nineteen_question_config();
    let mut img = PageImage::white(1000, 1000);
    // Ink only the left third of the A2-1 box.
    let spec = cfg.boxes[&0]
        .iter()
        .find(|b| b.question == "A2" && b.answer == 1)
        .unwrap();
    let side = (cfg.params.cell_size * 1000.0).round() as usize;
    let row = (spec.position.y * 1000.0).round() as usize;
    let col = (spec.position.x * 1000.0).round() as usize;
    for r in 0..side {
        for c in 0..side / 3 {
            img.set(row + r, col + c, 0.0);
        }
    }

    let reading = read_page(&img, &cfg, 0, 1).unwrap();
    let result = score_student(&cfg, 0, &[reading]).unwrap();
    assert!(result.checked["A2"].is_empty());
}
