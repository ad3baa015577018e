use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use markgrid_config::TestConfig;
use markgrid_core::{AnswerId, QuestionId, TestId};

use crate::read::PageReading;
use crate::GradeError;

/// Grading outcome for one student's sheet.
#[derive(Clone, Debug, Serialize)]
pub struct GradingResult {
    pub id: TestId,
    /// Name from the id roster, when the id is listed.
    pub student: Option<String>,
    /// Real answer indices observed checked, per real question.
    pub checked: BTreeMap<QuestionId, BTreeSet<AnswerId>>,
    /// Real correct-answer indices, per real question.
    pub correct: BTreeMap<QuestionId, BTreeSet<AnswerId>>,
    /// Per-question score.
    pub scores: BTreeMap<QuestionId, f64>,
    pub total: f64,
}

/// Score one student from the readings of *all* their pages.
///
/// A question's score is only defined once every one of its boxes has been
/// classified, so a missing page fails the whole sheet rather than producing
/// a silently partial score.
pub fn score_student(
    cfg: &TestConfig,
    id: TestId,
    readings: &[PageReading],
) -> Result<GradingResult, GradeError> {
    for page in cfg.pages(id)? {
        if !readings.iter().any(|r| r.id == id && r.page == page) {
            return Err(GradeError::MissingPage { id, page });
        }
    }

    let mut checked: BTreeMap<QuestionId, BTreeSet<AnswerId>> = cfg
        .correct_answers
        .keys()
        .map(|q| (q.clone(), BTreeSet::new()))
        .collect();
    for reading in readings.iter().filter(|r| r.id == id) {
        for (question, answer) in reading.checked() {
            checked
                .entry(question.to_string())
                .or_default()
                .insert(answer);
        }
    }

    let weights = &cfg.params;
    let mut scores = BTreeMap::new();
    let mut total = 0.0;
    for (question, correct) in &cfg.correct_answers {
        let marked = &checked[question];
        let good = marked.intersection(correct).count() as f64;
        let bad = marked.difference(correct).count() as f64;
        let score = (good * weights.correct - bad * weights.incorrect).max(weights.floor);
        total += score;
        scores.insert(question.clone(), score);
    }

    Ok(GradingResult {
        id,
        student: cfg.ids.get(&id).cloned(),
        checked,
        correct: cfg.correct_answers.clone(),
        scores,
        total,
    })
}
