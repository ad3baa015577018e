use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use markgrid_core::{AnswerId, CheckboxSpec, QuestionId, TestId};

use crate::{ConfigError, Parameters};

/// One student's shuffle: the displayed order of real questions, and per
/// question the displayed order of real answers.
///
/// The apparent index of a real item is its 1-based position in the matching
/// sequence, so real→apparent and apparent→real are mutual inverses by
/// construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shuffle {
    pub questions: Vec<QuestionId>,
    pub answers: BTreeMap<QuestionId, Vec<AnswerId>>,
}

impl Shuffle {
    pub(crate) fn question_apparent(&self, question: &str) -> Option<usize> {
        self.questions.iter().position(|q| q == question).map(|i| i + 1)
    }

    pub(crate) fn answer_apparent(&self, question: &str, answer: AnswerId) -> Option<usize> {
        self.answers
            .get(question)?
            .iter()
            .position(|&a| a == answer)
            .map(|i| i + 1)
    }
}

/// Immutable per-batch record: parameters, shuffles, correct-answer sets,
/// box layout and rosters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    pub params: Parameters,
    /// Page-normalized anchor of the student-id table.
    pub id_table: Point2<f64>,
    /// Per test id, the question/answer shuffle.
    pub shuffles: BTreeMap<TestId, Shuffle>,
    /// Real correct-answer indices per real question; identical for every
    /// test id, only the display order differs.
    pub correct_answers: BTreeMap<QuestionId, BTreeSet<AnswerId>>,
    /// Per test id, all checkboxes in apparent display order.
    pub boxes: BTreeMap<TestId, Vec<CheckboxSpec>>,
    pub students: Vec<String>,
    pub ids: BTreeMap<TestId, String>,
}

impl TestConfig {
    fn shuffle(&self, id: TestId) -> Result<&Shuffle, ConfigError> {
        self.shuffles.get(&id).ok_or(ConfigError::UnknownTest(id))
    }

    /// Checkboxes of one test page.
    pub fn page_boxes(&self, id: TestId, page: u32) -> Result<Vec<&CheckboxSpec>, ConfigError> {
        let boxes = self.boxes.get(&id).ok_or(ConfigError::UnknownTest(id))?;
        Ok(boxes.iter().filter(|b| b.page == page).collect())
    }

    /// Pages present in one test, ascending.
    pub fn pages(&self, id: TestId) -> Result<Vec<u32>, ConfigError> {
        let boxes = self.boxes.get(&id).ok_or(ConfigError::UnknownTest(id))?;
        let mut pages: Vec<u32> = boxes.iter().map(|b| b.page).collect();
        pages.sort_unstable();
        pages.dedup();
        Ok(pages)
    }

    /// Translate a real question (and optionally a real answer) into the
    /// apparent indices displayed on sheet `id`. Omitting the answer
    /// translates the question axis only.
    pub fn real_to_apparent(
        &self,
        id: TestId,
        question: &str,
        answer: Option<AnswerId>,
    ) -> Result<(usize, Option<usize>), ConfigError> {
        let shuffle = self.shuffle(id)?;
        let q = shuffle
            .question_apparent(question)
            .ok_or_else(|| ConfigError::UnknownQuestion(question.to_string()))?;
        let a = match answer {
            None => None,
            Some(answer) => Some(shuffle.answer_apparent(question, answer).ok_or_else(|| {
                ConfigError::UnknownAnswer {
                    question: question.to_string(),
                    answer,
                }
            })?),
        };
        Ok((q, a))
    }

    /// Inverse of [`TestConfig::real_to_apparent`].
    pub fn apparent_to_real(
        &self,
        id: TestId,
        question: usize,
        answer: Option<usize>,
    ) -> Result<(QuestionId, Option<AnswerId>), ConfigError> {
        let shuffle = self.shuffle(id)?;
        let q = shuffle
            .questions
            .get(question.wrapping_sub(1))
            .ok_or(ConfigError::ApparentOutOfRange(question))?
            .clone();
        let a = match answer {
            None => None,
            Some(answer) => Some(
                *shuffle
                    .answers
                    .get(&q)
                    .and_then(|order| order.get(answer.wrapping_sub(1)))
                    .ok_or(ConfigError::ApparentOutOfRange(answer))?,
            ),
        };
        Ok((q, a))
    }

    /// For every apparent question number on sheet `id`, the set of apparent
    /// answer numbers that are correct, derived from the real correct-answer
    /// sets through the id's shuffle.
    pub fn correct_answers(
        &self,
        id: TestId,
    ) -> Result<BTreeMap<usize, BTreeSet<usize>>, ConfigError> {
        let shuffle = self.shuffle(id)?;
        let mut out = BTreeMap::new();
        for (pos, question) in shuffle.questions.iter().enumerate() {
            let real = self
                .correct_answers
                .get(question)
                .ok_or_else(|| ConfigError::UnknownQuestion(question.clone()))?;
            let mut apparent = BTreeSet::new();
            for &answer in real {
                let a = shuffle.answer_apparent(question, answer).ok_or(
                    ConfigError::UnknownAnswer {
                        question: question.clone(),
                        answer,
                    },
                )?;
                apparent.insert(a);
            }
            out.insert(pos + 1, apparent);
        }
        Ok(out)
    }
}
