use std::path::Path;
use std::sync::Arc;

use crate::ai::{AiClient, LinkSuggester, Summarizer, SummaryCache, Tutor};
use crate::config::Config;
use crate::content::ArticleStore;
use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub tutor: Arc<Tutor>,
    pub links: Arc<LinkSuggester>,
    pub store: Arc<ArticleStore>,
}

impl AppState {
    pub fn new(client: AiClient, store: ArticleStore) -> Self {
        let client = Arc::new(client);
        let cache = Arc::new(SummaryCache::new());

        Self {
            summarizer: Arc::new(Summarizer::new(Arc::clone(&client), cache)),
            tutor: Arc::new(Tutor::new(Arc::clone(&client))),
            links: Arc::new(LinkSuggester::new(client)),
            store: Arc::new(store),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = AiClient::new(&config.ai)?;
        if !client.has_api_key() {
            tracing::warn!(
                "No AI API key configured (set {}); AI endpoints will fail",
                config.ai.api_key_env
            );
        }

        let store = match &config.content.posts_path {
            Some(path) => ArticleStore::from_path(Path::new(path))?,
            None => ArticleStore::default(),
        };

        Ok(Self::new(client, store))
    }
}
