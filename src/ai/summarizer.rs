use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::ai::cache::SummaryCache;
use crate::ai::client::{AiClient, CompletionRequest};
use crate::ai::normalize::{estimate_read_time, strip_html};
use crate::ai::parser::parse_summary;
use crate::ai::prompt::{summary_prompt, SUMMARY_SYSTEM_PROMPT};
use crate::error::Result;
use crate::models::{ArticleSummary, ChatMessage, SummaryPayload};

pub const MAX_KEY_POINTS: usize = 5;

const EMPTY_SUMMARY_PLACEHOLDER: &str = "Summary not available";

/// Cached front door for article summaries.
///
/// Concurrent misses for the same post are not coalesced: each issues its
/// own upstream call and the last one to finish owns the cache entry.
pub struct Summarizer {
    client: Arc<AiClient>,
    cache: Arc<SummaryCache>,
}

impl Summarizer {
    pub fn new(client: Arc<AiClient>, cache: Arc<SummaryCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &Arc<SummaryCache> {
        &self.cache
    }

    /// Returns the cached summary for `post_id`, generating it on a miss.
    /// Errors are returned as-is and never cached.
    pub async fn get_summary(
        &self,
        post_id: &str,
        title: &str,
        raw_html: &str,
    ) -> Result<Arc<ArticleSummary>> {
        if let Some(cached) = self.cache.get(post_id).await {
            tracing::debug!(post_id, "summary cache hit");
            return Ok(cached);
        }

        let plain_text = strip_html(raw_html);

        let request = CompletionRequest {
            system: Some(SUMMARY_SYSTEM_PROMPT.to_string()),
            messages: vec![ChatMessage::user(summary_prompt(title, &plain_text))],
            temperature: 0.3,
            max_output_tokens: 1024,
            json_mode: false,
        };

        let generated = match self.client.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(post_id, "summary generation failed: {}", e);
                return Err(e);
            }
        };

        let payload = parse_summary(&generated);
        let summary = Self::assemble(post_id, payload, estimate_read_time(&plain_text));

        tracing::info!(
            post_id,
            model = self.client.model(),
            key_points = summary.key_points.len(),
            "generated article summary"
        );

        Ok(self.cache.put(post_id, summary).await)
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    fn assemble(post_id: &str, payload: SummaryPayload, estimated_read_time: String) -> ArticleSummary {
        let summary = match payload.summary.trim() {
            "" => EMPTY_SUMMARY_PLACEHOLDER.to_string(),
            text => text.to_string(),
        };

        let key_points = payload
            .key_points
            .into_iter()
            .map(|point| point.trim().to_string())
            .filter(|point| !point.is_empty())
            .take(MAX_KEY_POINTS)
            .collect();

        ArticleSummary {
            id: format!("summary_{}_{}", post_id, Uuid::new_v4().simple()),
            post_id: post_id.to_string(),
            summary,
            key_points,
            estimated_read_time,
            created_at: Utc::now(),
        }
    }
}
