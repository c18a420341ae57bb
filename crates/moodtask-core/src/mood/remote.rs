//! Remote mood classification over an OpenAI-compatible chat completions API.
//!
//! The model is asked for a JSON object with `mood`, `confidence` and
//! `explanation`. Anything else (transport error, timeout, bad status,
//! malformed payload, unknown mood) is a [`ClassifyError`] and the caller
//! falls back to the keyword strategy. There are no retries.

use std::time::Duration;

use indoc::formatdoc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AssessmentSource, Mood, MoodAssessment};
use crate::error::ClassifyError;
use crate::storage::config::ClassifierConfig;

const SYSTEM_PROMPT: &str =
    "You are a mood analysis expert. Analyze text and determine the user's emotional state.";

/// Settings for [`RemoteStrategy`].
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Full URL of the chat completions endpoint
    pub endpoint: String,
    pub model: String,
    /// Bearer token; `None` makes every call fail with `MissingApiKey`
    pub api_key: Option<String>,
    /// Environment variable the key was read from (for error messages)
    pub api_key_env: String,
    /// Upper bound for the whole request
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl RemoteConfig {
    /// Build from the `[classifier]` config section, reading the API key
    /// from the configured environment variable.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Shape the model is asked to answer with.
#[derive(Debug, Deserialize)]
struct MoodPayload {
    mood: String,
    confidence: f64,
    explanation: String,
}

/// Remote classification strategy.
#[derive(Debug, Clone)]
pub struct RemoteStrategy {
    config: RemoteConfig,
    http_client: Client,
}

impl RemoteStrategy {
    /// Create a strategy whose HTTP client enforces `config.timeout`.
    pub fn new(config: RemoteConfig) -> Result<Self, ClassifyError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Ask the remote model to classify `text`.
    pub async fn classify(&self, text: &str) -> Result<MoodAssessment, ClassifyError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ClassifyError::MissingApiKey {
                env_var: self.config.api_key_env.clone(),
            })?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(text),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            "requesting remote mood classification"
        );

        let resp = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClassifyError::Malformed(format!("response envelope: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(ClassifyError::EmptyResponse)?
            .message
            .content
            .unwrap_or_default();

        parse_content(&content)
    }
}

/// User prompt constraining the answer to the five moods.
pub fn build_prompt(text: &str) -> String {
    let moods = Mood::ALL
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(", ");

    formatdoc! {r#"
        Analyze the mood of the following text and respond with a JSON object containing:
        - mood: one of {moods}
        - confidence: a number between 0 and 1
        - explanation: a brief explanation of why this mood was detected

        Text to analyze: "{text}"

        Respond only with valid JSON."#,
        moods = moods,
        text = text,
    }
}

/// Validate the model's message content and turn it into an assessment.
fn parse_content(content: &str) -> Result<MoodAssessment, ClassifyError> {
    let json = strip_code_fence(content.trim());
    let payload: MoodPayload = serde_json::from_str(json)
        .map_err(|e| ClassifyError::Malformed(format!("mood payload: {e}")))?;

    // Exact canonical label only; `Mood::from_str` is for user input.
    let mood = Mood::ALL
        .into_iter()
        .find(|m| m.as_str() == payload.mood)
        .ok_or_else(|| ClassifyError::InvalidMood(payload.mood.clone()))?;

    if !payload.confidence.is_finite() || !(0.0..=1.0).contains(&payload.confidence) {
        return Err(ClassifyError::InvalidConfidence(payload.confidence));
    }

    Ok(MoodAssessment {
        mood,
        confidence: payload.confidence,
        explanation: payload.explanation,
        source: AssessmentSource::Remote,
    })
}

/// Models sometimes wrap JSON in a Markdown fence.
fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
