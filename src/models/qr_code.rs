use serde::{Deserialize, Serialize};

/// Pre-generated QR code from the admin gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeItem {
    pub id: i64,
    pub code: String,
    pub qr_code_url: String,
    #[serde(default)]
    pub is_assigned: bool,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct QrGalleryStats {
    pub total: u32,
    pub assigned: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateBatchRequest {
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignQrRequest {
    pub qr_code_id: i64,
    pub event_id: i64,
}

/// Reply of batch generation and bulk regeneration
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct QrBatchReply {
    pub message: Option<String>,
    pub count: Option<u32>,
}
