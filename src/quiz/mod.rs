pub mod state;
pub mod trivia;

use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use state::SavedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No questions were set or loaded yet.
    Empty,
    InProgress,
    /// Every question has been advanced past.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub wrong: usize,
    /// Truncated, never rounded up.
    pub percent: usize,
}

/// A quiz session over an ordered list of questions.
///
/// `question_no` is both the index of the next question and the number of
/// questions advanced past so far. The current question is kept as an index
/// into `questions`, which owns every question.
#[derive(Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    question_no: usize,
    score: usize,
    current: Option<usize>,
    state_path: PathBuf,
}

impl Quiz {
    pub fn new(state_path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Vec::new(),
            question_no: 0,
            score: 0,
            current: None,
            state_path: state_path.into(),
        }
    }

    pub fn set_questions(&mut self, questions: Vec<Question>) -> Result<()> {
        if questions.is_empty() {
            return Err(Error::NoQuestions);
        }
        info!("Starting a quiz with {} questions", questions.len());
        self.questions = questions;
        self.question_no = 0;
        self.score = 0;
        self.current = None;
        Ok(())
    }

    pub fn has_more_questions(&self) -> bool {
        self.question_no < self.questions.len()
    }

    /// Moves to the next question and returns it with its 1-based number.
    pub fn next_question(&mut self) -> Result<(usize, &Question)> {
        let index = self.question_no;
        if index >= self.questions.len() {
            return Err(Error::NoMoreQuestions);
        }
        self.current = Some(index);
        self.question_no += 1;
        debug!("Advanced to question {}", self.question_no);
        Ok((self.question_no, &self.questions[index]))
    }

    /// Checks the choice at `choice` against the current question and bumps
    /// the score when it is right.
    ///
    /// Calling this twice for the same question counts it twice; callers
    /// are expected to advance in between.
    pub fn check_answer(&mut self, choice: usize) -> Result<bool> {
        let is_correct = {
            let question = self.current_question().ok_or(Error::NoCurrentQuestion)?;
            let chosen = question
                .choices
                .get(choice)
                .ok_or(Error::ChoiceOutOfRange {
                    index: choice,
                    len: question.choices.len(),
                })?;
            question.is_correct(chosen)
        };

        if is_correct {
            self.score += 1;
        }
        debug!(
            "Answer {} to question {} is {}",
            choice,
            self.question_no,
            if is_correct { "correct" } else { "wrong" }
        );
        Ok(is_correct)
    }

    /// Computes the final score. Reading it ends the session for good, so
    /// any saved state file is deleted.
    pub fn get_score(&self) -> Result<Score> {
        if self.question_no == 0 {
            return Err(Error::NothingAnswered);
        }
        let score = Score {
            correct: self.score,
            wrong: self.question_no.saturating_sub(self.score),
            percent: self.score * 100 / self.question_no,
        };
        state::remove(&self.state_path)?;
        info!(
            "Quiz finished: {} correct, {} wrong ({}%)",
            score.correct, score.wrong, score.percent
        );
        Ok(score)
    }

    /// Writes the whole quiz to the state file.
    ///
    /// The question being shown is not answered yet, so the stored number
    /// points one before it; advancing after a reload shows it again.
    pub fn save_state(&self) -> Result<()> {
        let saved = SavedState {
            questions: self.questions.clone(),
            question_no: self.question_no.saturating_sub(1),
            score: self.score,
        };
        state::write(&self.state_path, &saved)?;
        info!(
            "Saved quiz at question {} to {}",
            saved.question_no + 1,
            self.state_path.display()
        );
        Ok(())
    }

    pub fn has_loadable_state(&self) -> bool {
        self.state_path.exists()
    }

    /// Replaces this quiz with the one in the state file.
    /// Does nothing when there is no state file.
    pub fn load_saved_state(&mut self) -> Result<()> {
        let saved = match state::read(&self.state_path)? {
            Some(saved) => saved,
            None => {
                debug!("No saved state at {}", self.state_path.display());
                return Ok(());
            }
        };
        if saved.question_no >= saved.questions.len() {
            return Err(Error::CorruptState(format!(
                "question {} of {}",
                saved.question_no,
                saved.questions.len()
            )));
        }
        if saved.score > saved.questions.len() {
            return Err(Error::CorruptState(format!(
                "score {} with only {} questions",
                saved.score,
                saved.questions.len()
            )));
        }

        info!(
            "Resuming quiz at question {} of {}",
            saved.question_no + 1,
            saved.questions.len()
        );
        self.questions = saved.questions;
        self.question_no = saved.question_no;
        self.score = saved.score;
        self.current = Some(saved.question_no);
        Ok(())
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|index| self.questions.get(index))
    }

    pub fn question_no(&self) -> usize {
        self.question_no
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn state(&self) -> QuizState {
        if self.questions.is_empty() {
            QuizState::Empty
        } else if self.has_more_questions() {
            QuizState::InProgress
        } else {
            QuizState::Finished
        }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    text: String,
    correct_answer: String,
    choices: Vec<String>,
}

impl Question {
    pub fn new(text: String, correct_answer: String, incorrect_choices: Vec<String>) -> Self {
        Self::with_rng(text, correct_answer, incorrect_choices, &mut rand::thread_rng())
    }

    pub fn with_rng<R>(
        text: String,
        correct_answer: String,
        incorrect_choices: Vec<String>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut choices = incorrect_choices;
        choices.push(correct_answer.clone());
        // Shuffled once here so the correct answer isn't always the last one
        choices.shuffle(rng);

        return Self {
            text,
            correct_answer,
            choices,
        };
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        answer.to_lowercase() == self.correct_answer.to_lowercase()
    }
}
