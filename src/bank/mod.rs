//! Question bank loading and validation

pub mod descriptions;

pub use descriptions::{Descriptions, DESCRIPTION_PLACEHOLDER};

use crate::{BankError, Question};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default bank file name, looked up in the working directory
pub const QUESTIONS_FILENAME: &str = "questions.json";

/// Where question records come from
pub trait QuestionSource {
    /// Human-readable name of the source, used in error messages
    fn origin(&self) -> String;

    /// Fetch the raw question records in bank order
    fn fetch(&self) -> Result<Vec<Question>, BankError>;
}

/// A JSON file holding an array of question records
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonFileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Question>, BankError> {
        let content = fs::read_to_string(&self.path).map_err(|source| BankError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_questions(&content, &self.origin())
    }
}

/// Questions already in memory (tests, embedding)
pub struct InMemorySource {
    origin: String,
    questions: Vec<Question>,
}

impl InMemorySource {
    pub fn new(origin: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            origin: origin.into(),
            questions,
        }
    }
}

impl QuestionSource for InMemorySource {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn fetch(&self) -> Result<Vec<Question>, BankError> {
        Ok(self.questions.clone())
    }
}

/// Parse a JSON array of question records
pub fn parse_questions(json: &str, origin: &str) -> Result<Vec<Question>, BankError> {
    serde_json::from_str(json).map_err(|source| BankError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// A validated, non-empty question bank in its original order
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load and validate questions from a source
    pub fn load(source: &dyn QuestionSource) -> Result<Self, BankError> {
        let origin = source.origin();
        let bank = Self::from_questions(source.fetch()?, &origin)?;
        tracing::debug!(
            origin = %origin,
            questions = bank.len(),
            categories = bank.categories().len(),
            "loaded question bank"
        );
        Ok(bank)
    }

    /// Load a bank from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        Self::load(&JsonFileSource::new(path))
    }

    /// Validate a list of questions: non-empty, unique ids, every question categorized
    pub fn from_questions(questions: Vec<Question>, origin: &str) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty {
                origin: origin.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if question.category.trim().is_empty() {
                return Err(BankError::MissingCategory {
                    origin: origin.to_string(),
                    id: question.id.clone(),
                });
            }
            if !seen.insert(&question.id) {
                return Err(BankError::DuplicateId {
                    origin: origin.to_string(),
                    id: question.id.clone(),
                });
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: empty banks are rejected on load
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !categories.contains(&question.category.as_str()) {
                categories.push(&question.category);
            }
        }
        categories
    }
}
