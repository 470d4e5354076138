use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::ArticleSummary;

/// Process-lifetime store of generated summaries, keyed by post id.
///
/// No expiry and no size bound. Entries are shared via `Arc`, so repeated
/// hits hand out the same value until [`SummaryCache::clear`].
#[derive(Debug, Default)]
pub struct SummaryCache {
    entries: RwLock<HashMap<String, Arc<ArticleSummary>>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, post_id: &str) -> Option<Arc<ArticleSummary>> {
        self.entries.read().await.get(post_id).cloned()
    }

    /// Stores `summary`, replacing any existing entry for `post_id`.
    pub async fn put(&self, post_id: &str, summary: ArticleSummary) -> Arc<ArticleSummary> {
        let summary = Arc::new(summary);
        self.entries
            .write()
            .await
            .insert(post_id.to_string(), Arc::clone(&summary));
        summary
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
