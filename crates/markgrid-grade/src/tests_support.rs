//! Shared fixtures: synthetic configs and pages for the unit tests.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;

use markgrid_config::{Parameters, Shuffle, TestConfig};
use markgrid_core::{CheckboxSpec, PageImage, TestId};

use crate::read::box_rect;

/// A one-page batch with two sheets: test 0 in generation order, test 1 with
/// reversed questions and rotated answers.
pub(crate) fn grid_config(
    labels: &[&str],
    n_answers: u32,
    correct: &[(&str, &[u32])],
) -> TestConfig {
    let correct_answers: BTreeMap<String, BTreeSet<u32>> = correct
        .iter()
        .map(|(q, answers)| (q.to_string(), answers.iter().copied().collect()))
        .collect();

    let identity: Vec<u32> = (1..=n_answers).collect();
    let mut rotated = identity.clone();
    rotated.rotate_left(1);

    let mut shuffles = BTreeMap::new();
    shuffles.insert(
        0,
        Shuffle {
            questions: labels.iter().map(|q| q.to_string()).collect(),
            answers: labels
                .iter()
                .map(|q| (q.to_string(), identity.clone()))
                .collect(),
        },
    );
    shuffles.insert(
        1,
        Shuffle {
            questions: labels.iter().rev().map(|q| q.to_string()).collect(),
            answers: labels
                .iter()
                .map(|q| (q.to_string(), rotated.clone()))
                .collect(),
        },
    );

    let mut boxes = BTreeMap::new();
    for (&id, shuffle) in &shuffles {
        let mut sheet = Vec::new();
        for (qi, question) in shuffle.questions.iter().enumerate() {
            for (ai, &answer) in shuffle.answers[question].iter().enumerate() {
                sheet.push(CheckboxSpec {
                    page: 1,
                    question: question.clone(),
                    answer,
                    correct: correct_answers[question].contains(&answer),
                    position: Point2::new(0.05 + 0.06 * ai as f64, 0.05 + 0.045 * qi as f64),
                });
            }
        }
        boxes.insert(id, sheet);
    }

    TestConfig {
        params: Parameters::default(),
        id_table: Point2::new(0.85, 0.02),
        shuffles,
        correct_answers,
        boxes,
        students: vec!["Ada Lovelace".to_string(), "Charles Babbage".to_string()],
        ids: [(0, "Ada Lovelace".to_string()), (1, "Charles Babbage".to_string())].into(),
    }
}

pub(crate) fn page_for(_cfg: &TestConfig) -> PageImage {
    PageImage::white(1000, 1000)
}

/// Fill the configured box of `(question, answer)` on sheet `id` with ink.
pub(crate) fn fill_box(
    cfg: &TestConfig,
    img: &mut PageImage,
    id: TestId,
    question: &str,
    answer: u32,
) {
    let spec = cfg.boxes[&id]
        .iter()
        .find(|b| b.question == question && b.answer == answer)
        .expect("box exists");
    let rect = box_rect(cfg, img, id, spec).expect("box fits");
    for r in 0..rect.height {
        for c in 0..rect.width {
            img.set((rect.top as usize) + r, (rect.left as usize) + c, 0.0);
        }
    }
}
