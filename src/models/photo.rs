use serde::{Deserialize, Serialize};

/// Item of `GET /api/events/{id}/photos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}
