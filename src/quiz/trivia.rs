use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::{Config, Difficulty};
use crate::error::{Error, Result};
use crate::quiz::Question;

/// Pulls multiple-choice questions from an Open Trivia Database style API.
pub struct TriviaClient {
    client: Client,
    api_url: String,
    amount: u8,
    category: Option<u32>,
    difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<TriviaRecord>,
}

#[derive(Debug, Deserialize)]
struct TriviaRecord {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl TriviaClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            amount: config.question_amount,
            category: config.category,
            difficulty: config.difficulty,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("amount", self.amount.to_string()),
            ("type", "multiple".to_string()),
        ];
        if let Some(category) = self.category {
            query.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty", difficulty.as_str().to_string()));
        }
        query
    }

    pub async fn fetch_questions(&self) -> Result<Vec<Question>> {
        info!("Fetching {} questions from {}", self.amount, self.api_url);
        let response = self
            .client
            .get(&self.api_url)
            .query(&self.query())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let questions = parse_questions(&body)?;
        debug!("Received {} questions", questions.len());
        Ok(questions)
    }
}

fn parse_questions(body: &str) -> Result<Vec<Question>> {
    let response: TriviaResponse = serde_json::from_str(body)?;
    if response.response_code != 0 {
        warn!("Trivia API answered with code {}", response.response_code);
        return Err(Error::Api(response.response_code));
    }
    if response.results.is_empty() {
        return Err(Error::NoQuestions);
    }

    let questions = response
        .results
        .into_iter()
        .map(|record| {
            Question::new(
                decode_html_entities(&record.question),
                decode_html_entities(&record.correct_answer),
                record
                    .incorrect_answers
                    .iter()
                    .map(|answer| decode_html_entities(answer))
                    .collect(),
            )
        })
        .collect();
    Ok(questions)
}

/// The API escapes its text for HTML, e.g. `Schr&ouml;dinger&#039;s cat`.
fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "easy",
                "category": "Geography",
                "question": "What is the capital of France?",
                "correct_answer": "Paris",
                "incorrect_answers": ["London", "Berlin", "Madrid"]
            },
            {
                "type": "multiple",
                "difficulty": "medium",
                "category": "Science: Computers",
                "question": "What does &quot;HTTP&quot; stand for?",
                "correct_answer": "Hypertext Transfer Protocol",
                "incorrect_answers": ["Hyperlink &amp; Text Protocol", "Home Tool Transfer Protocol", "Schr&ouml;dinger&#039;s Protocol"]
            }
        ]
    }"#;

    #[test]
    fn parses_records_into_questions() {
        let questions = parse_questions(SAMPLE).unwrap();
        assert_eq!(questions.len(), 2);

        let first = &questions[0];
        assert_eq!(first.text(), "What is the capital of France?");
        assert_eq!(first.correct_answer(), "Paris");
        let mut choices = first.choices().to_vec();
        choices.sort();
        assert_eq!(choices, ["Berlin", "London", "Madrid", "Paris"]);

        let second = &questions[1];
        assert_eq!(second.text(), "What does \"HTTP\" stand for?");
        assert!(second
            .choices()
            .contains(&"Hyperlink & Text Protocol".to_string()));
        assert!(second
            .choices()
            .contains(&"Schrödinger's Protocol".to_string()));
    }

    #[test]
    fn non_zero_response_code_is_an_error() {
        let body = r#"{"response_code": 1, "results": []}"#;
        assert!(matches!(parse_questions(body), Err(Error::Api(1))));

        let body = r#"{"response_code": 5}"#;
        assert!(matches!(parse_questions(body), Err(Error::Api(5))));
    }

    #[test]
    fn empty_results_is_an_error() {
        let body = r#"{"response_code": 0, "results": []}"#;
        assert!(matches!(parse_questions(body), Err(Error::NoQuestions)));
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(parse_questions("<html>"), Err(Error::Json(_))));

        let body = r#"{"response_code": 0, "results": [{"question": "No answers?"}]}"#;
        assert!(matches!(parse_questions(body), Err(Error::Json(_))));
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_html_entities("plain text"), "plain text");
        assert_eq!(decode_html_entities("&lt;b&gt; &amp;&amp;"), "<b> &&");
        assert_eq!(decode_html_entities("caf&eacute; &#233; &#xE9;"), "café é é");
        assert_eq!(decode_html_entities("&unknown; & ;"), "&unknown; & ;");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
        assert_eq!(decode_html_entities("Ang&aring;rd"), "Angård");
        assert_eq!(decode_html_entities("S&atilde;o Paulo"), "São Paulo");
        assert_eq!(decode_html_entities("K&oslash;benhavn"), "København");
        assert_eq!(decode_html_entities("No&euml;l"), "Noël");
        assert_eq!(decode_html_entities("&Delta;"), "Δ");
        assert_eq!(decode_html_entities("Cura&ccedil;ao"), "Curaçao");
    }

    #[test]
    fn query_includes_optional_filters() {
        let mut config = Config::default();
        let client = TriviaClient::new(&config);
        assert_eq!(
            client.query(),
            vec![("amount", "10".to_string()), ("type", "multiple".to_string())]
        );

        config.question_amount = 5;
        config.category = Some(18);
        config.difficulty = Some(Difficulty::Hard);
        let client = TriviaClient::new(&config);
        assert_eq!(
            client.query(),
            vec![
                ("amount", "5".to_string()),
                ("type", "multiple".to_string()),
                ("category", "18".to_string()),
                ("difficulty", "hard".to_string()),
            ]
        );
    }

    /// Answers exactly one request with `status` and `body`, handing back the
    /// request head it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api.php", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(request).unwrap()
        });

        (url, handle)
    }

    fn client_for(url: String) -> TriviaClient {
        let config = Config {
            api_url: url,
            question_amount: 2,
            category: Some(22),
            difficulty: Some(Difficulty::Easy),
            ..Config::default()
        };
        // Keep a proxy from the environment out of the way of the local server
        let client = Client::builder().no_proxy().build().unwrap();
        TriviaClient::with_client(&config, client)
    }

    #[tokio::test]
    async fn fetch_questions_from_server() {
        let (url, server) = serve_once("200 OK", SAMPLE).await;

        let questions = client_for(url).fetch_questions().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "What is the capital of France?");
        assert_eq!(questions[1].correct_answer(), "Hypertext Transfer Protocol");

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /api.php?"), "{}", request_line);
        for param in ["amount=2", "type=multiple", "category=22", "difficulty=easy"] {
            assert!(request_line.contains(param), "{} missing {}", request_line, param);
        }
    }

    #[tokio::test]
    async fn server_error_status_is_an_http_error() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;

        let result = client_for(url).fetch_questions().await;
        assert!(matches!(result, Err(Error::Http(_))), "{:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn api_error_code_in_ok_response() {
        let (url, server) = serve_once("200 OK", r#"{"response_code": 2, "results": []}"#).await;

        let result = client_for(url).fetch_questions().await;
        assert!(matches!(result, Err(Error::Api(2))), "{:?}", result);
        server.await.unwrap();
    }
}
