use std::io;

use dotenv::dotenv;
use log::info;
use trivia_quiz::{
    quiz::trivia::TriviaClient,
    ui::{Outcome, QuizUi},
    Config, Quiz,
};

#[tokio::main]
async fn main() -> trivia_quiz::Result<()> {
    // A missing .env file is fine, everything has a default
    dotenv().ok();
    pretty_env_logger::init();

    let config = Config::from_env()?;
    let mut quiz = Quiz::new(config.state_file.clone());

    if quiz.has_loadable_state() {
        info!("Found saved quiz at {}", config.state_file.display());
        quiz.load_saved_state()?;
    } else {
        let questions = TriviaClient::new(&config).fetch_questions().await?;
        quiz.set_questions(questions)?;
    }

    let stdin = io::stdin();
    let outcome = QuizUi::new(&mut quiz, stdin.lock(), io::stdout()).run()?;
    match outcome {
        Outcome::Finished(score) => info!("Finished with {}%", score.percent),
        Outcome::Saved => info!("Quiz saved for later"),
        Outcome::Exited => info!("Quiz abandoned"),
    }
    Ok(())
}
