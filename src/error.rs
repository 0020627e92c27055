pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The trivia API answered, but with a non-zero `response_code`.
    #[error("Trivia API returned response code {0}")]
    Api(u8),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No questions to play")]
    NoQuestions,

    #[error("There are no more questions left")]
    NoMoreQuestions,

    #[error("No question has been asked yet")]
    NoCurrentQuestion,

    #[error("Choice {index} is out of range, the question has {len} choices")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("Cannot compute a score before any question was answered")]
    NothingAnswered,

    #[error("Saved quiz state is corrupt: {0}")]
    CorruptState(String),
}
