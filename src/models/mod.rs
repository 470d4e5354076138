mod chat;
mod link;
mod post;
mod summary;

pub use chat::{ChatMessage, Role};
pub use link::FurtherReadingLink;
pub use post::{normalize_slug, Post, PostListing};
pub use summary::{ArticleSummary, SummaryPayload};
