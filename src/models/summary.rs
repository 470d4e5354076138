use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A generated summary as cached and served for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    /// Unique per generation, not stable across regenerations.
    pub id: String,
    pub post_id: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub estimated_read_time: String,
    pub created_at: DateTime<Utc>,
}

/// What the model was asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
}

/// Models sometimes send `null` for a field they have nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
