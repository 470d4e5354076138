use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::Result;

mod error;
pub mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/{slug}", get(handlers::get_post))
        .route(
            "/api/summary",
            post(handlers::create_summary).delete(handlers::clear_summaries),
        )
        .route("/api/summary/{post_id}", get(handlers::post_summary))
        .route("/api/chat", post(handlers::chat))
        .route("/api/links", post(handlers::links))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
