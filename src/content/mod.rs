use std::path::Path;

use crate::error::Result;
use crate::models::{Post, PostListing};

pub use crate::models::normalize_slug;

/// Read-only, in-memory set of published posts.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    posts: Vec<Post>,
}

impl ArticleStore {
    /// Posts are kept newest first.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { posts }
    }

    /// Loads a JSON array of posts.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let posts: Vec<Post> = serde_json::from_str(&content)?;
        tracing::info!("Loaded {} posts from {}", posts.len(), path.display());
        Ok(Self::new(posts))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn listings(&self) -> Vec<PostListing> {
        self.posts.iter().map(Post::listing).collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        let wanted = normalize_slug(slug);
        self.posts.iter().find(|p| p.slug() == wanted)
    }
}
