//! Line-oriented configuration parser.
//!
//! Sections are driven by an explicit current-section state, never by
//! recursion; malformed lines abort the load and carry the raw line out for
//! manual correction.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;

use markgrid_core::{AnswerId, CheckboxSpec, QuestionId, TestId};

use crate::{ConfigError, Parameters, Shuffle, TestConfig};

#[derive(Clone, Copy, Debug)]
enum Section {
    Header,
    Answers(TestId),
    Boxes(TestId),
    Students,
    Ids,
}

struct KeyLine {
    line_no: usize,
    raw: String,
    /// Apparent correct-answer numbers, as listed.
    answers: Vec<usize>,
}

struct BoxLine {
    line_no: usize,
    raw: String,
    spec: CheckboxSpec,
}

#[derive(Default)]
struct Builder {
    params: Parameters,
    id_table: Option<Point2<f64>>,
    keys: BTreeMap<TestId, Vec<KeyLine>>,
    boxes: BTreeMap<TestId, Vec<BoxLine>>,
    students: Vec<String>,
    ids: BTreeMap<TestId, String>,
}

impl TestConfig {
    /// Parse the line-oriented text format.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut builder = Builder::default();
        let mut section = Section::Header;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("***") {
                section = section_marker(line)
                    .map_err(|reason| ConfigError::parse(line_no, line, reason))?;
                continue;
            }
            match section {
                Section::Header => builder.header_line(line_no, line)?,
                Section::Answers(id) => builder.answer_line(id, line_no, line)?,
                Section::Boxes(id) => builder.box_line(id, line_no, line)?,
                Section::Students => builder.students.push(line.to_string()),
                Section::Ids => builder.id_line(line_no, line)?,
            }
        }

        builder.finalize()
    }
}

fn section_marker(line: &str) -> Result<Section, String> {
    let inner = line
        .strip_prefix("*** ")
        .and_then(|s| s.strip_suffix(" ***"))
        .ok_or_else(|| "malformed section marker".to_string())?;
    match inner {
        "STUDENTS LIST" => Ok(Section::Students),
        "IDS LIST" => Ok(Section::Ids),
        _ => {
            if let Some(id) = strip_test_marker(inner, "ANSWERS") {
                return Ok(Section::Answers(parse_test_id(id)?));
            }
            if let Some(id) = strip_test_marker(inner, "BOXES") {
                return Ok(Section::Boxes(parse_test_id(id)?));
            }
            Err(format!("unknown section {inner:?}"))
        }
    }
}

fn strip_test_marker<'a>(inner: &'a str, name: &str) -> Option<&'a str> {
    inner
        .strip_prefix(name)?
        .strip_prefix(" (TEST ")?
        .strip_suffix(')')
}

fn parse_test_id(text: &str) -> Result<TestId, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("bad test id {text:?}"))
}

fn parse_point(text: &str) -> Option<Point2<f64>> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some(Point2::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
    ))
}

impl Builder {
    fn header_line(&mut self, line_no: usize, line: &str) -> Result<(), ConfigError> {
        if let Some(rest) = line.strip_prefix("ID-table:") {
            if self.id_table.is_some() {
                return Err(ConfigError::parse(line_no, line, "duplicate ID-table anchor"));
            }
            let point = parse_point(rest)
                .ok_or_else(|| ConfigError::parse(line_no, line, "malformed anchor position"))?;
            self.id_table = Some(point);
            return Ok(());
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ConfigError::parse(line_no, line, "expected `key: value`"))?;
        self.params
            .set(key.trim(), value)
            .map_err(|reason| ConfigError::parse(line_no, line, reason))
    }

    fn answer_line(&mut self, id: TestId, line_no: usize, line: &str) -> Result<(), ConfigError> {
        let (q, rest) = line
            .split_once("->")
            .ok_or_else(|| ConfigError::parse(line_no, line, "expected `q -> a1,a2,...`"))?;
        let q: usize = q
            .trim()
            .parse()
            .map_err(|_| ConfigError::parse(line_no, line, "bad question number"))?;
        let key = self.keys.entry(id).or_default();
        let expected = key.len() + 1;
        if q != expected {
            return Err(ConfigError::parse(
                line_no,
                line,
                format!("answer-key line {expected} carries question {q}"),
            ));
        }
        let mut answers = Vec::new();
        for part in rest.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let a: usize = part
                .parse()
                .map_err(|_| ConfigError::parse(line_no, line, "bad answer number"))?;
            if answers.contains(&a) {
                return Err(ConfigError::parse(
                    line_no,
                    line,
                    format!("answer {a} listed twice"),
                ));
            }
            answers.push(a);
        }
        key.push(KeyLine {
            line_no,
            raw: line.to_string(),
            answers,
        });
        Ok(())
    }

    fn box_line(&mut self, id: TestId, line_no: usize, line: &str) -> Result<(), ConfigError> {
        let fail = |reason: &str| ConfigError::parse(line_no, line, reason);

        let rest = line.strip_prefix('Q').ok_or_else(|| fail("expected `Q`"))?;
        let (qa, rest) = rest
            .split_once(' ')
            .ok_or_else(|| fail("expected `Q<q>-<a> (...)`"))?;
        let (question, answer) = qa
            .rsplit_once('-')
            .ok_or_else(|| fail("expected `<q>-<a>`"))?;
        if question.is_empty() {
            return Err(fail("empty question label"));
        }
        let answer: AnswerId = answer.parse().map_err(|_| fail("bad answer id"))?;

        let flag = rest
            .strip_prefix('(')
            .and_then(|s| s.split_once("): "))
            .ok_or_else(|| fail("expected `(<True|False>): `"))?;
        let (flag, rest) = flag;
        let correct = match flag {
            "True" => true,
            "False" => false,
            _ => return Err(fail("expected `True` or `False`")),
        };

        let rest = rest
            .strip_prefix("page ")
            .ok_or_else(|| fail("expected `page <p>`"))?;
        let (page, rest) = rest
            .split_once(", position ")
            .ok_or_else(|| fail("expected `, position (<x>, <y>)`"))?;
        let page: u32 = page.trim().parse().map_err(|_| fail("bad page number"))?;
        let position = parse_point(rest).ok_or_else(|| fail("malformed position"))?;

        self.boxes.entry(id).or_default().push(BoxLine {
            line_no,
            raw: line.to_string(),
            spec: CheckboxSpec {
                page,
                question: question.to_string(),
                answer,
                correct,
                position,
            },
        });
        Ok(())
    }

    fn id_line(&mut self, line_no: usize, line: &str) -> Result<(), ConfigError> {
        let (id, name) = line
            .split_once(':')
            .ok_or_else(|| ConfigError::parse(line_no, line, "expected `<id>: <name>`"))?;
        let id: TestId = id
            .trim()
            .parse()
            .map_err(|_| ConfigError::parse(line_no, line, "bad student id"))?;
        if self.ids.insert(id, name.trim().to_string()).is_some() {
            return Err(ConfigError::parse(line_no, line, "duplicate student id"));
        }
        Ok(())
    }

    fn finalize(self) -> Result<TestConfig, ConfigError> {
        let id_table = self.id_table.ok_or(ConfigError::MissingIdTable)?;

        let mut shuffles: BTreeMap<TestId, Shuffle> = BTreeMap::new();
        let mut correct: BTreeMap<QuestionId, BTreeSet<AnswerId>> = BTreeMap::new();
        let mut flags: BTreeMap<(QuestionId, AnswerId), bool> = BTreeMap::new();
        let mut boxes: BTreeMap<TestId, Vec<CheckboxSpec>> = BTreeMap::new();

        for (&id, lines) in &self.boxes {
            let mut shuffle = Shuffle::default();
            let mut seen: BTreeSet<(u32, &str, AnswerId)> = BTreeSet::new();
            for entry in lines {
                let spec = &entry.spec;
                if !seen.insert((spec.page, spec.question.as_str(), spec.answer)) {
                    return Err(ConfigError::parse(
                        entry.line_no,
                        &entry.raw,
                        "duplicate box for this (page, question, answer)",
                    ));
                }
                if !shuffle.questions.contains(&spec.question) {
                    shuffle.questions.push(spec.question.clone());
                }
                let order = shuffle.answers.entry(spec.question.clone()).or_default();
                if !order.contains(&spec.answer) {
                    order.push(spec.answer);
                }
                match flags.get(&(spec.question.clone(), spec.answer)) {
                    None => {
                        flags.insert((spec.question.clone(), spec.answer), spec.correct);
                        if spec.correct {
                            correct
                                .entry(spec.question.clone())
                                .or_default()
                                .insert(spec.answer);
                        } else {
                            correct.entry(spec.question.clone()).or_default();
                        }
                    }
                    Some(&known) if known != spec.correct => {
                        return Err(ConfigError::parse(
                            entry.line_no,
                            &entry.raw,
                            "correctness flag disagrees with an earlier test",
                        ));
                    }
                    Some(_) => {}
                }
            }

            // Canonical storage order: apparent question, then apparent
            // answer, so serialize-then-parse reproduces the same shuffle.
            let mut ordered: Vec<CheckboxSpec> = lines.iter().map(|l| l.spec.clone()).collect();
            ordered.sort_by_key(|spec| {
                let q = shuffle.question_apparent(&spec.question).unwrap_or(0);
                let a = shuffle.answer_apparent(&spec.question, spec.answer).unwrap_or(0);
                (q, a)
            });
            boxes.insert(id, ordered);
            shuffles.insert(id, shuffle);
        }

        // Every sheet must declare the same questions and answers; only the
        // display order may differ.
        let mut declared: Option<(TestId, BTreeMap<&QuestionId, BTreeSet<AnswerId>>)> = None;
        for (&id, shuffle) in &shuffles {
            let this: BTreeMap<&QuestionId, BTreeSet<AnswerId>> = shuffle
                .answers
                .iter()
                .map(|(q, order)| (q, order.iter().copied().collect()))
                .collect();
            match &declared {
                None => declared = Some((id, this)),
                Some((first, canon)) => {
                    if *canon != this {
                        return Err(ConfigError::Inconsistent(format!(
                            "test {id} declares different questions or answers than test {first}"
                        )));
                    }
                }
            }
        }

        for (&id, key) in &self.keys {
            let shuffle = shuffles
                .get(&id)
                .ok_or_else(|| ConfigError::Inconsistent(format!("test {id} has an answer key but no boxes")))?;
            if key.len() != shuffle.questions.len() {
                return Err(ConfigError::Inconsistent(format!(
                    "test {id} keys {} questions but lays out {}",
                    key.len(),
                    shuffle.questions.len()
                )));
            }
            for (i, line) in key.iter().enumerate() {
                let question = &shuffle.questions[i];
                let order = &shuffle.answers[question];
                let mut real: BTreeSet<AnswerId> = BTreeSet::new();
                for &a in &line.answers {
                    let real_a = *order.get(a.wrapping_sub(1)).ok_or_else(|| {
                        ConfigError::parse(
                            line.line_no,
                            &line.raw,
                            format!("answer-key line {} lists answer {a} beyond the {} declared", i + 1, order.len()),
                        )
                    })?;
                    real.insert(real_a);
                }
                let canon = &correct[question];
                if real.len() != canon.len() {
                    return Err(ConfigError::parse(
                        line.line_no,
                        &line.raw,
                        format!(
                            "answer-key line {} lists {} correct answers where {} were declared for question {question:?}",
                            i + 1,
                            real.len(),
                            canon.len()
                        ),
                    ));
                }
                if real != *canon {
                    return Err(ConfigError::parse(
                        line.line_no,
                        &line.raw,
                        format!("answer-key line {} disagrees with the box layout of question {question:?}", i + 1),
                    ));
                }
            }
        }

        for &id in shuffles.keys() {
            if !self.keys.contains_key(&id) {
                return Err(ConfigError::Inconsistent(format!(
                    "test {id} has boxes but no answer key"
                )));
            }
        }

        log::debug!(
            "loaded {} sheets, {} questions, {} students",
            shuffles.len(),
            correct.len(),
            self.students.len()
        );
        Ok(TestConfig {
            params: self.params,
            id_table,
            shuffles,
            correct_answers: correct,
            boxes,
            students: self.students,
            ids: self.ids,
        })
    }
}
