use serde::{Deserialize, Serialize};

/// Item of `GET /api/storage-settings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageProvider {
    pub id: i64,
    pub provider: String,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub storage_used: String,
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub status: String,
}

impl StorageProvider {
    pub fn display_name(&self) -> &str {
        match self.provider.as_str() {
            "firebase" => "Firebase Storage",
            "google_drive" => "Google Drive",
            "dropbox" => "Dropbox",
            other => other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.provider.as_str() {
            "firebase" => "🔥",
            "google_drive" => "📁",
            "dropbox" => "📦",
            _ => "☁",
        }
    }

    pub fn status_label(&self) -> &str {
        match self.status.as_str() {
            "Active" => "Connected",
            other => other,
        }
    }
}
