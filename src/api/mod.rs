use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::error::GenerationError;
use crate::core::constants::SYSTEM_PROMPT;
use crate::core::message::Role;
use crate::core::settings::GenerationSettings;
use crate::core::transcript::Transcript;
use crate::utils::url::construct_api_url;

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatResponseChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatResponseChoice>,
}

/// Anything that can turn a transcript into an assistant reply.
///
/// The chat loop only talks to this trait, so tests can swap in canned
/// backends without a server.
#[async_trait]
pub trait CompletionBackend {
    async fn complete(
        &self,
        settings: &GenerationSettings,
        transcript: &Transcript,
    ) -> Result<String, GenerationError>;
}

/// HTTP client for OpenAI-compatible chat completion endpoints.
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        settings: &GenerationSettings,
        transcript: &Transcript,
    ) -> Result<String, GenerationError> {
        let request = build_request(settings, transcript);
        let url = construct_api_url(&self.base_url, "chat/completions");
        tracing::debug!(
            model = %settings.model,
            turns = transcript.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "completion request failed");
            return Err(GenerationError::from_api_response(status, &body));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::new(format!("Failed to parse API response: {err}")))?;

        first_choice_text(payload)
    }
}

/// Assemble the outbound request: the fixed system prompt first, then every
/// stored turn in order. The transcript itself is left untouched.
fn build_request(settings: &GenerationSettings, transcript: &Transcript) -> ChatRequest {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage {
        role: Role::System.as_str().to_string(),
        content: SYSTEM_PROMPT.to_string(),
    });
    for turn in transcript.iter() {
        messages.push(ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        });
    }

    ChatRequest {
        model: settings.model.as_str().to_string(),
        messages,
        temperature: settings.temperature,
        stream: false,
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GenerationError::new("API response contained no choices"))
}

pub mod error;
