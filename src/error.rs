//! Error types for loading, rating input and quiz sessions

use crate::QuestionId;
use std::path::PathBuf;
use thiserror::Error;

/// A rating that is not on the 1-10 scale
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("'{0}' is not a rating; enter a whole number from 1 to 10")]
    NotANumber(String),
    #[error("{0} is outside the rating scale; enter a number from 1 to 10")]
    OutOfRange(i64),
}

/// The question bank could not be loaded or failed validation
#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question bank JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no valid questions found in {origin}")]
    Empty { origin: String },
    #[error("duplicate question id '{id}' in {origin}")]
    DuplicateId { origin: String, id: QuestionId },
    #[error("question '{id}' in {origin} has no category")]
    MissingCategory { origin: String, id: QuestionId },
}

/// Misuse of a quiz session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a quiz with no questions")]
    EmptyBank,
    #[error("the quiz is already complete")]
    Finished,
}

/// The interactive prompt stopped before the quiz was complete
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended after {answered} of {total} questions; quiz abandoned")]
    Abandoned { answered: usize, total: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}
