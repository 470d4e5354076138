pub mod cache;
pub mod client;
pub mod links;
pub mod normalize;
pub mod parser;
pub mod prompt;
pub mod summarizer;
pub mod tutor;

pub use cache::SummaryCache;
pub use client::{AiClient, CompletionRequest};
pub use links::LinkSuggester;
pub use normalize::{estimate_read_time, strip_html};
pub use parser::{parse_links, parse_summary};
pub use summarizer::Summarizer;
pub use tutor::Tutor;
