//! Ollama-backed classifier client.

use crate::prompt::analysis_prompt;
use async_trait::async_trait;
use remedy_core::{ClassifierVerdict, RemedyError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Convert any displayable transport error into `RemedyError::Classifier`.
fn classifier_err(e: impl std::fmt::Display) -> RemedyError {
    RemedyError::Classifier(e.to_string())
}

/// Anything that can turn a raw log line into a structured verdict.
///
/// Production uses [`OllamaClassifier`]; tests inject stubs.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, log_line: &str) -> Result<ClassifierVerdict, RemedyError>;
}

/// Connection settings for the model service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    /// Hard ceiling on one classification round trip. A timeout is a
    /// classifier failure for that line, not a retryable condition.
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "mistral:7b".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClassifierConfig {
    /// Default settings overridden by `REMEDY_OLLAMA_URL` and
    /// `REMEDY_OLLAMA_MODEL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("REMEDY_OLLAMA_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("REMEDY_OLLAMA_MODEL") {
            config.model = model;
        }
        config
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// HTTP client for an Ollama `/api/chat` endpoint.
pub struct OllamaClassifier {
    http: reqwest::Client,
    config: ClassifierConfig,
}

impl OllamaClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, RemedyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(classifier_err)?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(&self, log_line: &str) -> Result<ClassifierVerdict, RemedyError> {
        let prompt = analysis_prompt(log_line);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
        };

        let response: ChatResponse = self
            .http
            .post(format!("{}/api/chat", self.config.base_url))
            .json(&request)
            .send()
            .await
            .map_err(classifier_err)?
            .error_for_status()
            .map_err(classifier_err)?
            .json()
            .await
            .map_err(classifier_err)?;

        tracing::debug!(model = %self.config.model, "classifier responded");
        parse_verdict(&response.message.content)
    }
}

/// Parse the model's reply into a verdict.
///
/// Tries the whole payload first, then the outermost `{...}` slice,
/// since models routinely wrap their JSON in prose or code fences.
/// Missing fields take the documented fallbacks via serde defaults.
pub fn parse_verdict(raw: &str) -> Result<ClassifierVerdict, RemedyError> {
    if let Ok(verdict) = serde_json::from_str::<ClassifierVerdict>(raw) {
        return Ok(verdict);
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Ok(verdict) = serde_json::from_str::<ClassifierVerdict>(&raw[start..=end]) {
                return Ok(verdict);
            }
        }
    }

    Err(RemedyError::MalformedVerdict(truncate(raw, 120)))
}

fn truncate(raw: &str, max: usize) -> String {
    if raw.len() <= max {
        raw.to_string()
    } else {
        let cut = raw
            .char_indices()
            .take_while(|(i, _)| *i < max)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &raw[..cut])
    }
}
