use std::io::{BufRead, Write};

use log::debug;

use crate::error::Result;
use crate::quiz::{Quiz, Score};

/// How a session in the terminal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished(Score),
    Saved,
    Exited,
}

enum Command {
    Answer(usize),
    Save,
    Exit,
}

/// Plays a quiz over any line based input and output, normally stdin/stdout.
pub struct QuizUi<'a, R, W> {
    quiz: &'a mut Quiz,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> QuizUi<'a, R, W> {
    pub fn new(quiz: &'a mut Quiz, input: R, output: W) -> Self {
        Self {
            quiz,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<Outcome> {
        self.display_title()?;
        self.display_question()?;

        loop {
            match self.read_command()? {
                Command::Answer(choice) => {
                    if let Some(score) = self.check_answer(choice)? {
                        return Ok(Outcome::Finished(score));
                    }
                }
                Command::Save => {
                    self.quiz.save_state()?;
                    writeln!(self.output, "Progress saved, see you next time!")?;
                    return Ok(Outcome::Saved);
                }
                Command::Exit => {
                    debug!("Leaving without saving");
                    return Ok(Outcome::Exited);
                }
            }
        }
    }

    fn display_title(&mut self) -> Result<()> {
        writeln!(self.output, "===== Quiz App =====")?;
        writeln!(
            self.output,
            "Type the number of your answer, 's' to save and quit, 'q' to quit."
        )?;
        Ok(())
    }

    fn display_question(&mut self) -> Result<()> {
        let (number, question) = self.quiz.next_question()?;
        writeln!(self.output)?;
        writeln!(self.output, "Q{}: {}", number, question.text())?;
        for (i, choice) in question.choices().iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }
        Ok(())
    }

    fn read_command(&mut self) -> Result<Command> {
        let choices = self
            .quiz
            .current_question()
            .map(|question| question.choices().len())
            .unwrap_or(0);

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Command::Exit);
            }

            let line = line.trim().to_lowercase();
            match line.as_str() {
                "s" | "save" => return Ok(Command::Save),
                "q" | "quit" | "exit" => return Ok(Command::Exit),
                _ => {}
            }
            match line.parse::<usize>() {
                Ok(n) if n >= 1 && n <= choices => return Ok(Command::Answer(n - 1)),
                _ => writeln!(
                    self.output,
                    "Pick an answer between 1 and {}, 's' to save or 'q' to quit.",
                    choices
                )?,
            }
        }
    }

    /// Returns the final score once the last question has been answered.
    fn check_answer(&mut self, choice: usize) -> Result<Option<Score>> {
        if self.quiz.check_answer(choice)? {
            writeln!(self.output, "\u{2705} Correct answer!")?;
        } else {
            let correct = self
                .quiz
                .current_question()
                .map(|question| question.correct_answer())
                .unwrap_or_default();
            writeln!(
                self.output,
                "\u{274c} Oops! The correct answer was: {}",
                correct
            )?;
        }

        if self.quiz.has_more_questions() {
            self.display_question()?;
            return Ok(None);
        }
        let score = self.display_score()?;
        Ok(Some(score))
    }

    fn display_score(&mut self) -> Result<Score> {
        let score = self.quiz.get_score()?;
        writeln!(self.output)?;
        writeln!(self.output, "===== Quiz Result =====")?;
        writeln!(self.output, "Correct: {} \u{2705}", score.correct)?;
        writeln!(self.output, "Incorrect: {} \u{274c}", score.wrong)?;
        writeln!(self.output, "Result: {}%", score.percent)?;
        Ok(score)
    }
}
