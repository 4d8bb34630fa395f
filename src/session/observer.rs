//! Lifecycle hooks for quiz sessions

use crate::{AnswerSet, Question, Rating};

/// Emitted each time a question is answered
#[derive(Debug, Clone, Copy)]
pub struct AnswerEvent<'a> {
    /// 1-based position of the question in presentation order
    pub number: usize,
    pub total: usize,
    pub question: &'a Question,
    /// Rating as entered
    pub raw: Rating,
    /// Rating as scored (after flip)
    pub value: Rating,
    /// Answers recorded so far, including this one
    pub answered: usize,
}

/// Receives session lifecycle events. All methods default to no-ops.
pub trait SessionObserver {
    fn on_answer(&mut self, _event: &AnswerEvent<'_>) {}

    /// Called exactly once, when the last question is answered
    fn on_complete(&mut self, _answers: &AnswerSet) {}
}

impl<T: SessionObserver + ?Sized> SessionObserver for &mut T {
    fn on_answer(&mut self, event: &AnswerEvent<'_>) {
        (**self).on_answer(event)
    }

    fn on_complete(&mut self, answers: &AnswerSet) {
        (**self).on_complete(answers)
    }
}

/// Ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Reports session events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_answer(&mut self, event: &AnswerEvent<'_>) {
        tracing::debug!(
            question = event.number,
            total = event.total,
            id = %event.question.id,
            category = %event.question.category,
            raw = event.raw.value(),
            flipped = event.question.flip_value,
            value = event.value.value(),
            answered = event.answered,
            "question answered"
        );
    }

    fn on_complete(&mut self, answers: &AnswerSet) {
        tracing::info!(answered = answers.len(), "quiz complete");
    }
}
