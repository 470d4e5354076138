use std::sync::Arc;

use crate::ai::client::{AiClient, CompletionRequest};
use crate::ai::parser::parse_links;
use crate::ai::prompt::{links_prompt, LINKS_SYSTEM_PROMPT};
use crate::error::{AppError, Result};
use crate::models::{ChatMessage, FurtherReadingLink};

pub struct LinkSuggester {
    client: Arc<AiClient>,
}

impl LinkSuggester {
    pub fn new(client: Arc<AiClient>) -> Self {
        Self { client }
    }

    /// Asks the provider for further-reading links about an article.
    /// An unusable reply yields an empty list rather than an error.
    pub async fn suggest(&self, title: &str, content: &str) -> Result<Vec<FurtherReadingLink>> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::Validation("title and content are required".to_string()));
        }

        let request = CompletionRequest {
            system: Some(LINKS_SYSTEM_PROMPT.to_string()),
            messages: vec![ChatMessage::user(links_prompt(title, content))],
            temperature: 0.3,
            max_output_tokens: 1024,
            json_mode: true,
        };

        let generated = self.client.complete(request).await?;
        let links = parse_links(&generated);
        tracing::debug!("suggested {} further-reading links", links.len());
        Ok(links)
    }
}
