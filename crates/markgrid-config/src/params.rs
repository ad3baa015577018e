use serde::{Deserialize, Serialize};

/// Typed header parameters of the configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Scoring mode label recorded by the generator.
    pub mode: String,
    /// Points granted per correctly checked answer.
    pub correct: f64,
    /// Points withdrawn per incorrectly checked answer.
    pub incorrect: f64,
    /// Lower bound of a question's score.
    pub floor: f64,
    /// Checkbox side length, normalized to page width.
    pub cell_size: f64,
    /// Intensities below this count as ink.
    pub gray_level: f64,
    /// Minimum ink ratio for a box to count as checked.
    pub proportion: f64,
    /// Scanner error tolerance (non-ink fraction, drift bound, exclusion
    /// margin).
    pub margin: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mode: "some".to_string(),
            correct: 1.0,
            incorrect: 0.0,
            floor: 0.0,
            cell_size: 0.025,
            gray_level: 0.4,
            proportion: 0.5,
            margin: 0.3,
        }
    }
}

type ParamSetter = fn(&mut Parameters, &str) -> Result<(), String>;

fn set_f64(slot: &mut f64, value: &str) -> Result<(), String> {
    *slot = value
        .trim()
        .parse()
        .map_err(|_| format!("expected a number, got {value:?}"))?;
    Ok(())
}

fn set_mode(p: &mut Parameters, v: &str) -> Result<(), String> {
    p.mode = v.trim().to_string();
    Ok(())
}

fn set_correct(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.correct, v)
}

fn set_incorrect(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.incorrect, v)
}

fn set_floor(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.floor, v)
}

fn set_cell_size(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.cell_size, v)
}

fn set_gray_level(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.gray_level, v)
}

fn set_proportion(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.proportion, v)
}

fn set_margin(p: &mut Parameters, v: &str) -> Result<(), String> {
    set_f64(&mut p.margin, v)
}

/// Key → handler table, populated in one static pass. Unknown keys are a
/// parse error at the call site, never silently ignored.
pub(crate) static PARAM_TABLE: &[(&str, ParamSetter)] = &[
    ("mode", set_mode),
    ("correct", set_correct),
    ("incorrect", set_incorrect),
    ("floor", set_floor),
    ("cell-size", set_cell_size),
    ("gray-level", set_gray_level),
    ("proportion", set_proportion),
    ("margin", set_margin),
];

impl Parameters {
    pub(crate) fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match PARAM_TABLE.iter().find(|(name, _)| *name == key) {
            Some((_, setter)) => setter(self, value),
            None => Err(format!("unknown parameter {key:?}")),
        }
    }

    /// Header lines in the canonical emission order.
    pub(crate) fn to_lines(&self) -> Vec<String> {
        vec![
            format!("mode: {}", self.mode),
            format!("correct: {}", self.correct),
            format!("incorrect: {}", self.incorrect),
            format!("floor: {}", self.floor),
            format!("cell-size: {}", self.cell_size),
            format!("gray-level: {}", self.gray_level),
            format!("proportion: {}", self.proportion),
            format!("margin: {}", self.margin),
        ]
    }
}
