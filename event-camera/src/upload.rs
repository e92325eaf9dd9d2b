//! Upload of captured stills and recordings to the event endpoints.
//!
//! Stills go to `POST /api/events/{id}/photos` as multipart with a `photo`
//! file, an optional `filter` and a `quality` tag. Recordings go to
//! `POST /api/events/{id}/videos` with a `video` file and `quality`. There is
//! no retry and no offline queue: a failed upload is reported and the capture
//! is dropped.

use crate::models::{PhotoUpload, VideoUpload};
use serde::Deserialize;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur during upload
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Transport failure, no response
    Network(String),
    /// The server answered but did not accept the upload
    Rejected { status: u16, message: Option<String> },
    Decode(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Network(e) => write!(f, "Network error: {}", e),
            UploadError::Rejected { status, message } => match message {
                Some(msg) => write!(f, "Upload rejected ({}): {}", status, msg),
                None => write!(f, "Upload rejected ({})", status),
            },
            UploadError::Decode(e) => write!(f, "Invalid server response: {}", e),
        }
    }
}

impl std::error::Error for UploadError {}

impl UploadError {
    /// Message provided by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            UploadError::Rejected {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Successful upload acknowledgement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReceipt {
    pub message: Option<String>,
}

/// JSON body returned by both upload endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// A 2xx answer counts as success unless the body says otherwise
    pub fn into_result(self, status: u16) -> UploadResult<UploadReceipt> {
        let ok_status = (200..300).contains(&status);
        if ok_status && self.success != Some(false) {
            Ok(UploadReceipt {
                message: self.message,
            })
        } else {
            Err(UploadError::Rejected {
                status,
                message: self.message,
            })
        }
    }
}

pub fn photos_path(event_id: i64) -> String {
    format!("/api/events/{}/photos", event_id)
}

pub fn videos_path(event_id: i64) -> String {
    format!("/api/events/{}/videos", event_id)
}

/// Text fields sent alongside the `photo` file
pub fn photo_form_fields(photo: &PhotoUpload) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(filter) = &photo.filter {
        fields.push(("filter", filter.clone()));
    }
    fields.push(("quality", photo.quality.tag().to_string()));
    fields
}

/// Text fields sent alongside the `video` file
pub fn video_form_fields(video: &VideoUpload) -> Vec<(&'static str, String)> {
    vec![("quality", video.quality.tag().to_string())]
}

/// What was uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

/// Outcome of one upload, handed to the host page so it can refresh the
/// gallery and show feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub event_id: i64,
    pub kind: MediaKind,
    /// Recording length, `None` for stills
    pub duration_secs: Option<u32>,
    pub outcome: UploadResult<UploadReceipt>,
}

impl UploadReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Cached query to refresh after a successful upload
    pub fn query_key(&self) -> String {
        photos_path(self.event_id)
    }

    pub fn title(&self) -> String {
        match (&self.outcome, self.kind) {
            (Ok(_), MediaKind::Photo) => "Photo uploaded successfully".to_string(),
            (Ok(_), MediaKind::Video) => "Video uploaded successfully!".to_string(),
            (Err(UploadError::Network(_)), MediaKind::Video) => "Upload error".to_string(),
            (Err(_), _) => "Upload failed".to_string(),
        }
    }

    /// Server message when there is one, otherwise a fixed fallback
    pub fn description(&self) -> String {
        match (&self.outcome, self.kind) {
            (Ok(_), MediaKind::Photo) => {
                "Your photo has been uploaded and is being processed.".to_string()
            }
            (Ok(_), MediaKind::Video) => format!(
                "Video duration: {}",
                crate::models::format_elapsed(self.duration_secs.unwrap_or(0))
            ),
            (Err(e), kind) => match (e.server_message(), kind) {
                (Some(msg), _) => msg.to_string(),
                (None, MediaKind::Photo) => "Failed to upload photo".to_string(),
                (None, MediaKind::Video) => match e {
                    UploadError::Network(_) => "Network error while uploading video".to_string(),
                    _ => "Failed to upload video".to_string(),
                },
            },
        }
    }
}

/// Destination for captured media
#[allow(async_fn_in_trait)]
pub trait Uploader {
    async fn upload_photo(&self, event_id: i64, photo: &PhotoUpload) -> UploadResult<UploadReceipt>;
    async fn upload_video(&self, event_id: i64, video: &VideoUpload) -> UploadResult<UploadReceipt>;
}

#[cfg(feature = "upload")]
pub use http::HttpUploader;

#[cfg(feature = "upload")]
mod http {
    use super::*;
    use reqwest::multipart::{Form, Part};

    /// Uploads over HTTP to the VIPix backend
    #[derive(Clone)]
    pub struct HttpUploader {
        base_url: String,
        client: reqwest::Client,
    }

    impl HttpUploader {
        pub fn new(base_url: String) -> Self {
            Self {
                base_url,
                client: reqwest::Client::new(),
            }
        }

        pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
            Self { base_url, client }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }

        async fn send(&self, path: String, form: Form) -> UploadResult<UploadReceipt> {
            let url = self.url(&path);
            log::debug!("POST {}", url);

            let response = self
                .client
                .post(&url)
                .multipart(form)
                .send()
                .await
                .map_err(|e| UploadError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| UploadError::Network(e.to_string()))?;

            let parsed = if body.trim().is_empty() {
                UploadResponse::default()
            } else {
                match serde_json::from_str::<UploadResponse>(&body) {
                    Ok(parsed) => parsed,
                    Err(e) if (200..300).contains(&status) => {
                        return Err(UploadError::Decode(e.to_string()));
                    }
                    // Non-JSON error pages: keep the text as the message
                    Err(_) => UploadResponse {
                        success: Some(false),
                        message: Some(body.trim().to_string()),
                    },
                }
            };

            let result = parsed.into_result(status);
            match &result {
                Ok(_) => log::info!("Upload to {} accepted", path),
                Err(e) => log::warn!("Upload to {} failed: {}", path, e),
            }
            result
        }
    }

    impl Uploader for HttpUploader {
        async fn upload_photo(
            &self,
            event_id: i64,
            photo: &PhotoUpload,
        ) -> UploadResult<UploadReceipt> {
            let part = Part::bytes(photo.jpeg.clone())
                .file_name("photo.jpg")
                .mime_str("image/jpeg")
                .map_err(|e| UploadError::Network(e.to_string()))?;
            let mut form = Form::new().part("photo", part);
            for (name, value) in photo_form_fields(photo) {
                form = form.text(name, value);
            }
            self.send(photos_path(event_id), form).await
        }

        async fn upload_video(
            &self,
            event_id: i64,
            video: &VideoUpload,
        ) -> UploadResult<UploadReceipt> {
            let part = Part::bytes(video.webm.clone())
                .file_name("video.webm")
                .mime_str("video/webm")
                .map_err(|e| UploadError::Network(e.to_string()))?;
            let mut form = Form::new().part("video", part);
            for (name, value) in video_form_fields(video) {
                form = form.text(name, value);
            }
            self.send(videos_path(event_id), form).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::models::Quality;

    fn photo(filter: Filter) -> PhotoUpload {
        PhotoUpload {
            jpeg: vec![0xFF, 0xD8],
            filter: filter.upload_tag(),
            quality: Quality::Hd,
        }
    }

    #[test]
    fn test_vintage_is_tagged() {
        let fields = photo_form_fields(&photo(Filter::Vintage));
        assert!(fields.contains(&("filter", "vintage".to_string())));
        assert!(fields.contains(&("quality", "hd".to_string())));
    }

    #[test]
    fn test_no_filter_field_for_none() {
        let fields = photo_form_fields(&photo(Filter::None));
        assert!(fields.iter().all(|(name, _)| *name != "filter"));
    }

    #[test]
    fn test_response_success_flag_overrides_status() {
        let resp: UploadResponse =
            serde_json::from_str(r#"{"success":false,"message":"Photo limit reached"}"#).unwrap();
        let err = resp.into_result(200).unwrap_err();
        assert_eq!(err.server_message(), Some("Photo limit reached"));
    }

    #[test]
    fn test_error_status_without_message() {
        let err = UploadResponse::default().into_result(500).unwrap_err();
        assert_eq!(err.server_message(), None);
        assert!(UploadResponse::default().into_result(201).is_ok());
    }

    #[test]
    fn test_report_prefers_server_message() {
        let report = UploadReport {
            event_id: 3,
            kind: MediaKind::Photo,
            duration_secs: None,
            outcome: Err(UploadError::Rejected {
                status: 413,
                message: Some("File too large".to_string()),
            }),
        };
        assert_eq!(report.title(), "Upload failed");
        assert_eq!(report.description(), "File too large");

        let report = UploadReport {
            outcome: Err(UploadError::Rejected {
                status: 500,
                message: None,
            }),
            ..report
        };
        assert_eq!(report.description(), "Failed to upload photo");
    }

    #[test]
    fn test_video_report_shows_duration() {
        let report = UploadReport {
            event_id: 3,
            kind: MediaKind::Video,
            duration_secs: Some(65),
            outcome: Ok(UploadReceipt::default()),
        };
        assert_eq!(report.description(), "Video duration: 1:05");
        assert_eq!(report.query_key(), "/api/events/3/photos");
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(photos_path(7), "/api/events/7/photos");
        assert_eq!(videos_path(7), "/api/events/7/videos");
    }
}
