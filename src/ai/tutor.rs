use std::sync::Arc;

use crate::ai::client::{AiClient, CompletionRequest};
use crate::ai::prompt::tutor_system_prompt;
use crate::error::{AppError, Result};
use crate::models::ChatMessage;

/// Biology tutoring chat relayed to the AI provider. Stateless.
pub struct Tutor {
    client: Arc<AiClient>,
}

impl Tutor {
    pub fn new(client: Arc<AiClient>) -> Self {
        Self { client }
    }

    /// `context` lists the articles the tutor may reference.
    pub async fn reply(&self, messages: Vec<ChatMessage>, context: Option<&str>) -> Result<String> {
        if messages.is_empty() {
            return Err(AppError::Validation("messages must not be empty".to_string()));
        }

        let request = CompletionRequest {
            system: Some(tutor_system_prompt(context)),
            messages,
            temperature: 0.7,
            max_output_tokens: 1500,
            json_mode: false,
        };

        self.client.complete(request).await
    }
}
