//! Module descriptors and quiz questions.
//!
//! Both tables are embedded at compile time and parsed once at startup.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::error::LabError;
use crate::models::ModelKind;

const MODULES_JSON: &str = include_str!("../data/modules.json");
const QUIZ_JSON: &str = include_str!("../data/quiz.json");

/// Number of options every quiz question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Simulation tab a module opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    OhmsLaw,
    EmWaves,
    Models,
    Quiz,
    Tutor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub target_tab: Tab,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

/// The immutable module and question tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<ModuleDescriptor>,
    questions: Vec<QuizQuestion>,
}

impl Catalog {
    /// Load the tables embedded in the binary.
    pub fn load() -> Result<Self, LabError> {
        Self::from_json(MODULES_JSON, QUIZ_JSON)
    }

    /// Parse and validate both tables.
    pub fn from_json(modules_json: &str, quiz_json: &str) -> Result<Self, LabError> {
        let modules: Vec<ModuleDescriptor> = serde_json::from_str(modules_json)?;
        let questions: Vec<QuizQuestion> = serde_json::from_str(quiz_json)?;

        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id.as_str()) {
                return Err(LabError::DuplicateModule(module.id.clone()));
            }
        }

        for (index, q) in questions.iter().enumerate() {
            if q.options.len() != OPTIONS_PER_QUESTION {
                return Err(LabError::InvalidQuestion {
                    index,
                    reason: format!("expected {OPTIONS_PER_QUESTION} options, found {}", q.options.len()),
                });
            }
            if q.correct_answer_index >= q.options.len() {
                return Err(LabError::InvalidQuestion {
                    index,
                    reason: format!("correct answer {} is out of range", q.correct_answer_index),
                });
            }
        }

        Ok(Self { modules, questions })
    }

    pub fn module(&self, id: &str) -> Result<&ModuleDescriptor, LabError> {
        self.modules
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| LabError::UnknownModule(id.to_string()))
    }

    /// Modules in display order.
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn modules_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.modules)
    }
}
