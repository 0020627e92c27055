pub mod config;
pub mod error;
pub mod quiz;
pub mod ui;

pub use config::Config;
pub use error::{Error, Result};
pub use quiz::{Question, Quiz, QuizState, Score};
