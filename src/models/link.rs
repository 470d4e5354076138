use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurtherReadingLink {
    pub title: String,
    pub url: String,
}
