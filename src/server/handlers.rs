use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::state::AppState;
use crate::models::{ArticleSummary, ChatMessage, FurtherReadingLink, Post, PostListing};

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub post_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LinksRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub links: Vec<FurtherReadingLink>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<PostListing>> {
    Json(state.store.listings())
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Post>> {
    state
        .store
        .get_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Post", &slug))
}

pub async fn post_summary(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<ArticleSummary>> {
    let post = state
        .store
        .get_by_id(&post_id)
        .ok_or_else(|| ApiError::not_found("Post", &post_id))?;

    let summary = state
        .summarizer
        .get_summary(&post.id, &post.title, &post.content)
        .await?;
    Ok(Json(summary.as_ref().clone()))
}

pub async fn create_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<Json<ArticleSummary>> {
    if request.post_id.trim().is_empty()
        || request.title.trim().is_empty()
        || request.content.trim().is_empty()
    {
        return Err(ApiError::validation("postId, title and content are required"));
    }

    // Stored posts are always summarised from their published content.
    let summary = match state.store.get_by_id(&request.post_id) {
        Some(post) => {
            state
                .summarizer
                .get_summary(&post.id, &post.title, &post.content)
                .await?
        }
        None => {
            state
                .summarizer
                .get_summary(&request.post_id, &request.title, &request.content)
                .await?
        }
    };
    Ok(Json(summary.as_ref().clone()))
}

pub async fn clear_summaries(State(state): State<AppState>) -> StatusCode {
    state.summarizer.clear_cache().await;
    tracing::info!("summary cache cleared");
    StatusCode::NO_CONTENT
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = state
        .tutor
        .reply(request.messages, request.context.as_deref())
        .await?;
    Ok(Json(ChatResponse { message }))
}

pub async fn links(
    State(state): State<AppState>,
    Json(request): Json<LinksRequest>,
) -> ApiResult<Json<LinksResponse>> {
    let links = state.links.suggest(&request.title, &request.content).await?;
    Ok(Json(LinksResponse { links }))
}
