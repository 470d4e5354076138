use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::{AppError, Result};
use crate::models::ChatMessage;

/// One completion call against the provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Ask the provider to constrain output to a JSON object.
    pub json_mode: bool,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Top-level response shapes observed from providers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    ChatCompletion(ChatCompletionEnvelope),
    GenerativeContent(GenerativeContentEnvelope),
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerativeContentEnvelope {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl ChatCompletionEnvelope {
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}

impl GenerativeContentEnvelope {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl Envelope {
    fn into_text(self) -> Result<String> {
        match self {
            Envelope::ChatCompletion(envelope) => envelope
                .into_text()
                .ok_or_else(|| AppError::UpstreamShape("response has no choices".to_string())),
            Envelope::GenerativeContent(envelope) => envelope
                .into_text()
                .ok_or_else(|| AppError::UpstreamShape("response has no candidates".to_string())),
        }
    }
}

/// Extracts the generated text from a provider response body.
pub fn extract_generated_text(body: &str) -> Result<String> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|_| {
        AppError::UpstreamShape("response has neither choices nor candidates".to_string())
    })?;
    envelope.into_text()
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct AiClient {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl AiClient {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `request` and returns the generated text. Fails before any
    /// network I/O when no API key is configured.
    pub async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::MissingApiKey(self.api_key_env.clone()))?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system {
            messages.push(ChatMessage::system(system));
        }
        messages.extend(request.messages);

        let body = ChatCompletionBody {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("AI provider returned {}: {}", status, body);
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        extract_generated_text(&text)
    }
}
