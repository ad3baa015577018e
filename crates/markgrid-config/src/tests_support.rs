//! Shared fixtures for the crate's unit tests.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;

use markgrid_core::CheckboxSpec;

use crate::{Parameters, Shuffle, TestConfig};

/// Two questions ("A" correct {2}, "B" correct {3}), three answers each, two
/// sheets: test 0 in generation order, test 1 fully shuffled.
pub(crate) fn demo_config() -> TestConfig {
    let correct_answers: BTreeMap<_, BTreeSet<_>> = [
        ("A".to_string(), BTreeSet::from([2])),
        ("B".to_string(), BTreeSet::from([3])),
    ]
    .into();

    let mut shuffles = BTreeMap::new();
    shuffles.insert(
        0,
        Shuffle {
            questions: vec!["A".to_string(), "B".to_string()],
            answers: [
                ("A".to_string(), vec![1, 2, 3]),
                ("B".to_string(), vec![1, 2, 3]),
            ]
            .into(),
        },
    );
    shuffles.insert(
        1,
        Shuffle {
            questions: vec!["B".to_string(), "A".to_string()],
            answers: [
                ("A".to_string(), vec![2, 1, 3]),
                ("B".to_string(), vec![3, 2, 1]),
            ]
            .into(),
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
                    position: Point2::new(0.1 + 0.08 * ai as f64, 0.1 + 0.2 * qi as f64),
                });
            }
        }
        boxes.insert(id, sheet);
    }

    TestConfig {
        params: Parameters::default(),
        id_table: Point2::new(0.85, 0.05),
        shuffles,
        correct_answers,
        boxes,
        students: vec!["Ada Lovelace".to_string(), "Charles Babbage".to_string()],
        ids: [(0, "Ada Lovelace".to_string()), (1, "Charles Babbage".to_string())].into(),
    }
}
