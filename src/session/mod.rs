//! Quiz session state machine
//!
//! A session walks the questions once, in presentation order. Each question
//! goes through `AwaitingSelection` -> `Selected` and is recorded on
//! `advance()`; advancing past the last question completes the session and
//! hands back the finished [`AnswerSet`].

pub mod observer;

pub use observer::{AnswerEvent, NoopObserver, SessionObserver, TracingObserver};

use crate::bank::QuestionBank;
use crate::shuffle::shuffle;
use crate::{Answer, AnswerSet, Question, Rating, SessionError};
use rand::Rng;
use serde::Serialize;

/// Where the session is within the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rating", rename_all = "camelCase")]
pub enum SessionState {
    /// No rating chosen for the current question
    AwaitingSelection,
    /// A rating is chosen; advancing will record it
    Selected(Rating),
    /// Every question has been answered
    Complete,
}

/// Position within the quiz: `index` questions answered out of `total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub index: usize,
    pub total: usize,
}

impl Progress {
    /// Share of questions already answered, rounded to a whole percent
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.index as f64 / self.total as f64) * 100.0).round() as u8
    }

    /// 1-based number of the question being asked (capped at `total`)
    pub fn question_number(&self) -> usize {
        (self.index + 1).min(self.total)
    }
}

/// Result of [`QuizSession::advance`]
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Nothing was selected (or the session is already complete); no change
    Ignored,
    /// Answer recorded; now on the next question
    Next(Progress),
    /// Last answer recorded; the finished answers
    Complete(AnswerSet),
}

/// One pass through a question bank.
///
/// Questions are borrowed from the bank, never copied.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession<'b> {
    questions: Vec<&'b Question>,
    index: usize,
    state: SessionState,
    answers: AnswerSet,
    #[serde(skip)]
    observer: Box<dyn SessionObserver + 'b>,
}

impl<'b> QuizSession<'b> {
    /// Start a session over questions in the given order
    pub fn new(questions: Vec<&'b Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        Ok(Self {
            questions,
            index: 0,
            state: SessionState::AwaitingSelection,
            answers: AnswerSet::new(),
            observer: Box::new(NoopObserver),
        })
    }

    /// Start a session over the bank in shuffled order
    pub fn shuffled<R: Rng + ?Sized>(bank: &'b QuestionBank, rng: &mut R) -> Self {
        let ordered: Vec<&'b Question> = bank.questions().iter().collect();
        Self {
            questions: shuffle(&ordered, rng),
            index: 0,
            state: SessionState::AwaitingSelection,
            answers: AnswerSet::new(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Attach a lifecycle observer
    pub fn with_observer(mut self, observer: impl SessionObserver + 'b) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// The question awaiting an answer, or None once complete
    pub fn current_question(&self) -> Option<&'b Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.index).copied()
    }

    /// Rating chosen for the current question, if any
    pub fn pending(&self) -> Option<Rating> {
        match self.state {
            SessionState::Selected(rating) => Some(rating),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            index: self.index,
            total: self.questions.len(),
        }
    }

    /// Questions in presentation order
    pub fn questions(&self) -> &[&'b Question] {
        &self.questions
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Choose a rating for the current question, replacing any earlier choice.
    /// Nothing is recorded until [`advance`](Self::advance).
    pub fn select_rating(&mut self, rating: Rating) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Finished);
        }
        self.state = SessionState::Selected(rating);
        Ok(())
    }

    /// Record the pending rating and move on.
    ///
    /// Without a pending rating this is a no-op, like a disabled Next button.
    pub fn advance(&mut self) -> Advance {
        let SessionState::Selected(raw) = self.state else {
            return Advance::Ignored;
        };
        let question = self.questions[self.index];
        let value = question.score(raw);

        self.answers.insert(
            question.id.clone(),
            Answer {
                category: question.category.clone(),
                value,
            },
        );
        self.observer.on_answer(&AnswerEvent {
            number: self.index + 1,
            total: self.questions.len(),
            question,
            raw,
            value,
            answered: self.answers.len(),
        });

        self.index += 1;
        if self.index == self.questions.len() {
            self.state = SessionState::Complete;
            self.observer.on_complete(&self.answers);
            Advance::Complete(self.answers.clone())
        } else {
            self.state = SessionState::AwaitingSelection;
            Advance::Next(self.progress())
        }
    }
}

impl std::fmt::Debug for QuizSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("index", &self.index)
            .field("total", &self.questions.len())
            .field("state", &self.state)
            .field("answered", &self.answers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::parse_questions;
    use crate::shuffle::rng_from_seed;
    use crate::QuestionId;

    fn bank() -> QuestionBank {
        let questions = parse_questions(
            r#"[
                {"id": "s1", "category": "Sleep", "text": "I fall asleep easily"},
                {"id": "t1", "category": "Stress", "text": "I feel overwhelmed", "flipValue": true},
                {"id": "s2", "category": "Sleep", "text": "I wake up rested"}
            ]"#,
            "inline",
        )
        .unwrap();
        QuestionBank::from_questions(questions, "inline").unwrap()
    }

    fn in_order(bank: &QuestionBank) -> QuizSession<'_> {
        QuizSession::new(bank.questions().iter().collect()).unwrap()
    }

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        answered: Vec<(usize, u8, u8)>,
        completions: usize,
    }

    impl SessionObserver for Recorder {
        fn on_answer(&mut self, event: &AnswerEvent<'_>) {
            self.answered
                .push((event.number, event.raw.value(), event.value.value()));
        }

        fn on_complete(&mut self, _answers: &AnswerSet) {
            self.completions += 1;
        }
    }

    #[test]
    fn test_initial_state() {
        let bank = bank();
        let session = in_order(&bank);
        assert_eq!(session.state(), SessionState::AwaitingSelection);
        assert_eq!(session.index(), 0);
        assert_eq!(session.total(), 3);
        assert!(session.answers().is_empty());
        assert_eq!(session.current_question().unwrap().id.as_str(), "s1");
    }

    #[test]
    fn test_empty_question_list_rejected() {
        assert_eq!(QuizSession::new(vec![]).unwrap_err(), SessionError::EmptyBank);
    }

    #[test]
    fn test_advance_without_selection_is_noop() {
        let bank = bank();
        let mut session = in_order(&bank);
        assert_eq!(session.advance(), Advance::Ignored);
        assert_eq!(session.index(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_select_overwrites_pending_without_recording() {
        let bank = bank();
        let mut session = in_order(&bank);
        session.select_rating(rating(2)).unwrap();
        session.select_rating(rating(9)).unwrap();
        assert_eq!(session.pending(), Some(rating(9)));
        assert_eq!(session.state(), SessionState::Selected(rating(9)));
        assert!(session.answers().is_empty());

        session.advance();
        assert_eq!(session.answers().get(&QuestionId::from("s1")).unwrap().value, rating(9));
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn test_flip_applied_on_advance() {
        let bank = bank();
        let mut session = in_order(&bank);
        session.select_rating(rating(5)).unwrap();
        session.advance();
        session.select_rating(rating(3)).unwrap();
        session.advance();

        let stress = session.answers().get(&QuestionId::from("t1")).unwrap();
        assert_eq!(stress.category, "Stress");
        assert_eq!(stress.value, rating(8));
    }

    #[test]
    fn test_completes_after_n_advances() {
        let bank = bank();
        let mut session = in_order(&bank);

        for expected_index in 1..3 {
            session.select_rating(rating(6)).unwrap();
            match session.advance() {
                Advance::Next(progress) => {
                    assert_eq!(progress.index, expected_index);
                    assert_eq!(progress.total, 3);
                }
                other => panic!("expected Next, got {:?}", other),
            }
        }

        session.select_rating(rating(6)).unwrap();
        let answers = match session.advance() {
            Advance::Complete(answers) => answers,
            other => panic!("expected Complete, got {:?}", other),
        };
        assert_eq!(answers.len(), 3);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert_eq!(session.progress().percent(), 100);
    }

    #[test]
    fn test_no_mutation_after_complete() {
        let bank = bank();
        let mut session = in_order(&bank);
        for _ in 0..3 {
            session.select_rating(rating(4)).unwrap();
            session.advance();
        }
        assert_eq!(session.select_rating(rating(1)), Err(SessionError::Finished));
        assert_eq!(session.advance(), Advance::Ignored);
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn test_observer_sees_each_answer_and_one_completion() {
        let bank = bank();
        let mut recorder = Recorder::default();
        {
            let mut session = in_order(&bank).with_observer(&mut recorder);
            for v in [2, 3, 10] {
                session.select_rating(rating(v)).unwrap();
                session.advance();
            }
            session.advance();
        }
        assert_eq!(recorder.answered, vec![(1, 2, 2), (2, 3, 8), (3, 10, 10)]);
        assert_eq!(recorder.completions, 1);
    }

    #[test]
    fn test_shuffled_session_covers_bank() {
        let bank = bank();
        let mut rng = rng_from_seed(Some(3));
        let mut session = QuizSession::shuffled(&bank, &mut rng);
        assert_eq!(session.total(), 3);

        let mut answers = None;
        while let Some(_question) = session.current_question() {
            session.select_rating(rating(7)).unwrap();
            if let Advance::Complete(done) = session.advance() {
                answers = Some(done);
            }
        }
        let answers = answers.unwrap();
        for question in bank.questions() {
            assert!(answers.get(&question.id).is_some(), "missing {}", question.id);
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Progress { index: 0, total: 20 }.percent(), 0);
        assert_eq!(Progress { index: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { index: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { index: 3, total: 3 }.percent(), 100);
        assert_eq!(Progress { index: 0, total: 3 }.question_number(), 1);
        assert_eq!(Progress { index: 3, total: 3 }.question_number(), 3);
    }

    #[test]
    fn test_session_serializes() {
        let bank = bank();
        let mut session = in_order(&bank);
        session.select_rating(rating(4)).unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["state"]["state"], "selected");
        assert_eq!(json["state"]["rating"], 4);
        assert_eq!(json["questions"].as_array().unwrap().len(), 3);
    }
}
