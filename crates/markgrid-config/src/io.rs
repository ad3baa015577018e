//! Text and JSON persistence for [`TestConfig`].

use std::fs;
use std::path::Path;

use crate::{ConfigError, TestConfig};

impl TestConfig {
    /// Render the line-oriented text format; `parse` of the result yields an
    /// equal configuration.
    pub fn to_text(&self) -> Result<String, ConfigError> {
        let mut out: Vec<String> = self.params.to_lines();
        out.push(format!(
            "ID-table: ({}, {})",
            self.id_table.x, self.id_table.y
        ));

        for (&id, _) in &self.shuffles {
            out.push(String::new());
            out.push(format!("*** ANSWERS (TEST {id}) ***"));
            for (q, answers) in self.correct_answers(id)? {
                let list = answers
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                if list.is_empty() {
                    out.push(format!("{q} ->"));
                } else {
                    out.push(format!("{q} -> {list}"));
                }
            }
            out.push(String::new());
            out.push(format!("*** BOXES (TEST {id}) ***"));
            let boxes = self.boxes.get(&id).ok_or(ConfigError::UnknownTest(id))?;
            for spec in boxes {
                out.push(format!(
                    "Q{}-{} ({}): page {}, position ({}, {})",
                    spec.question,
                    spec.answer,
                    if spec.correct { "True" } else { "False" },
                    spec.page,
                    spec.position.x,
                    spec.position.y
                ));
            }
        }

        out.push(String::new());
        out.push("*** STUDENTS LIST ***".to_string());
        out.extend(self.students.iter().cloned());
        out.push(String::new());
        out.push("*** IDS LIST ***".to_string());
        for (id, name) in &self.ids {
            out.push(format!("{id}: {name}"));
        }
        out.push(String::new());
        Ok(out.join("\n"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_text()?)?;
        Ok(())
    }

    /// Load the structured nested-block export.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the structured nested-block export as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
