use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_QUESTION_AMOUNT: u8 = 10;
pub const DEFAULT_STATE_FILE: &str = "quiz_state.json";

// Open Trivia won't hand out more than this in one request
const MAX_QUESTION_AMOUNT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub question_amount: u8,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub state_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            question_amount: DEFAULT_QUESTION_AMOUNT,
            category: None,
            difficulty: None,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    /// The `.env` file, if any, must already be loaded.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let question_amount = match lookup("QUIZ_QUESTION_AMOUNT") {
            Some(raw) => parse_amount(&raw)?,
            None => defaults.question_amount,
        };

        let category = lookup("QUIZ_CATEGORY")
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|e| {
                    Error::Config(format!("Invalid value for QUIZ_CATEGORY: {}", e))
                })
            })
            .transpose()?;

        let difficulty = lookup("QUIZ_DIFFICULTY")
            .map(|raw| parse_difficulty(&raw))
            .transpose()?;

        return Ok(Self {
            api_url: lookup("QUIZ_API_URL").unwrap_or(defaults.api_url),
            question_amount,
            category,
            difficulty,
            state_file: lookup("QUIZ_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
        });
    }
}

fn parse_amount(raw: &str) -> Result<u8> {
    let amount: u8 = raw
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for QUIZ_QUESTION_AMOUNT: {}", e)))?;
    if amount == 0 || amount > MAX_QUESTION_AMOUNT {
        return Err(Error::Config(format!(
            "QUIZ_QUESTION_AMOUNT must be between 1 and {}, got {}",
            MAX_QUESTION_AMOUNT, amount
        )));
    }
    Ok(amount)
}

fn parse_difficulty(raw: &str) -> Result<Difficulty> {
    match raw.trim().to_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(Error::Config(format!(
            "Invalid value for QUIZ_DIFFICULTY: {}",
            other
        ))),
    }
}
