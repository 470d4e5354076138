use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ai::strip_html;

const EXCERPT_CHARS: usize = 150;
const DEFAULT_AUTHOR: &str = "BioNews Editorial";

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").unwrap());

/// A published post as stored in the posts file. `content` is HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Display-ready view of a post for the article listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub slug: String,
    pub category: String,
    pub author: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Lowercase, dash-separated, `[a-z0-9-]` only.
pub fn normalize_slug(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let dashed = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&dashed, "").into_owned()
}

impl Post {
    /// Explicit slug if present, otherwise derived from the title.
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.trim().is_empty() => normalize_slug(slug),
            _ => normalize_slug(&self.title),
        }
    }

    pub fn excerpt(&self) -> String {
        let source = match &self.preview {
            Some(preview) if !preview.trim().is_empty() => preview.clone(),
            _ => strip_html(&self.content),
        };

        if source.chars().count() > EXCERPT_CHARS {
            let cut: String = source.chars().take(EXCERPT_CHARS).collect();
            format!("{}...", cut)
        } else {
            source
        }
    }

    pub fn listing(&self) -> PostListing {
        PostListing {
            id: self.id.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt(),
            date: self.created_at.format("%B %-d, %Y").to_string(),
            slug: self.slug(),
            category: self.category.clone(),
            author: self
                .author
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            tags: self.tags.clone(),
            cover_image: self.cover_image.clone(),
        }
    }
}
