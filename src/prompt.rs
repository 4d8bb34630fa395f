//! Line-based terminal front end for a quiz session

use crate::session::{Advance, Progress, QuizSession};
use crate::{AnswerSet, ProgressStyle, PromptError, Question, QuizOptions, Rating};
use colored::Colorize;
use std::io::{BufRead, Write};

const BAR_WIDTH: usize = 30;

/// Format progress for display in the given style
pub fn format_progress(progress: Progress, style: ProgressStyle) -> String {
    match style {
        ProgressStyle::Bar => {
            let filled = (progress.percent() as usize * BAR_WIDTH) / 100;
            format!(
                "[{}{}] {}% complete",
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                progress.percent()
            )
        }
        ProgressStyle::Text => format!(
            "Question {} of {}",
            progress.question_number(),
            progress.total
        ),
    }
}

/// Asks each question on `output` and reads ratings from `input`, one per line
pub struct Prompt<R, W> {
    input: R,
    output: W,
    style: ProgressStyle,
    auto_advance: bool,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            style: ProgressStyle::Bar,
            auto_advance: true,
        }
    }

    /// Take progress style and advance behaviour from the quiz options
    pub fn with_options(mut self, options: &QuizOptions) -> Self {
        self.style = options.progress_style;
        self.auto_advance = options.auto_advance;
        self
    }

    /// Print the start screen
    pub fn intro(&mut self, categories: usize, questions: usize) -> Result<(), PromptError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Wheel of Health".bold())?;
        writeln!(
            self.output,
            "Discover your health strengths and areas for growth across {} key dimensions.",
            categories
        )?;
        writeln!(
            self.output,
            "Rate each of the {} statements from 1 to 10.",
            questions
        )?;
        Ok(())
    }

    /// Run the session to completion and return the answers.
    ///
    /// Input ending early abandons the session.
    pub fn run(&mut self, session: &mut QuizSession<'_>) -> Result<AnswerSet, PromptError> {
        while let Some(question) = session.current_question() {
            self.ask(session.progress(), question, session.pending())?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Err(PromptError::Abandoned {
                    answered: session.answers().len(),
                    total: session.total(),
                });
            }

            let entry = line.trim();
            if entry.is_empty() {
                if self.auto_advance {
                    continue;
                }
                match session.advance() {
                    Advance::Ignored => {
                        writeln!(self.output, "{}", "Pick a rating from 1 to 10 first.".yellow())?
                    }
                    Advance::Next(_) => {}
                    Advance::Complete(answers) => return Ok(answers),
                }
                continue;
            }

            match entry.parse::<Rating>() {
                Ok(rating) => {
                    session.select_rating(rating)?;
                    if self.auto_advance {
                        if let Advance::Complete(answers) = session.advance() {
                            return Ok(answers);
                        }
                    }
                }
                Err(e) => writeln!(self.output, "{}", e.to_string().yellow())?,
            }
        }

        // Only reachable if the session was already complete when handed over
        Ok(session.answers().clone())
    }

    fn ask(
        &mut self,
        progress: Progress,
        question: &Question,
        pending: Option<Rating>,
    ) -> Result<(), PromptError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", format_progress(progress, self.style).dimmed())?;
        writeln!(self.output, "{}", question.text.bold())?;
        if !question.low_label.is_empty() || !question.high_label.is_empty() {
            writeln!(
                self.output,
                "  1 = {}   10 = {}",
                question.low_label, question.high_label
            )?;
        }
        match pending {
            Some(rating) => write!(
                self.output,
                "Selected {} (Enter to continue, or pick again) > ",
                rating.to_string().cyan()
            )?,
            None if self.auto_advance => write!(self.output, "Rating 1-10 > ")?,
            None => write!(self.output, "Rating 1-10, then Enter > ")?,
        }
        self.output.flush()?;
        Ok(())
    }
}
