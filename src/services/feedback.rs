//! Applies a finished camera upload to app state.

use crate::cache::QueryCache;
use crate::error::AppError;
use crate::notifications::{Notifications, Variant};
use event_camera::UploadReport;

/// Success drops the event's cached photo listing; failure leaves the cache
/// alone. Either way one toast describes the outcome.
pub fn apply_upload_report(
    report: &UploadReport,
    cache: &mut QueryCache,
    notifications: &mut Notifications,
) -> bool {
    let variant = if report.is_success() {
        cache.invalidate(&report.query_key());
        Variant::Default
    } else {
        Variant::Destructive
    };
    notifications.push(report.title(), Some(report.description()), variant);
    report.is_success()
}

/// Toast for a camera that could not be started
pub fn camera_error_notice(error: &event_camera::CameraError) -> (String, String) {
    let description = AppError::from(error.clone()).user_message();
    ("Camera Error".to_string(), description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_camera::{MediaKind, UploadError, UploadReceipt};
    use serde_json::json;

    fn cache_with_photos(event_id: i64) -> QueryCache {
        let mut cache = QueryCache::new();
        cache.put(
            format!("/api/events/{}/photos", event_id),
            json!([{"id": 1, "url": "/p/1.jpg", "filename": "1.jpg"}]),
        );
        cache
    }

    #[test]
    fn test_failed_upload_keeps_cache_and_shows_server_message() {
        let mut cache = cache_with_photos(7);
        let before = cache.clone();
        let mut notifications = Notifications::new();
        let report = UploadReport {
            event_id: 7,
            kind: MediaKind::Photo,
            duration_secs: None,
            outcome: Err(UploadError::Rejected {
                status: 413,
                message: Some("Photo limit reached for this event".to_string()),
            }),
        };

        assert!(!apply_upload_report(&report, &mut cache, &mut notifications));
        assert_eq!(cache, before);
        let toast = notifications.latest().unwrap();
        assert_eq!(toast.variant, Variant::Destructive);
        assert!(toast
            .description
            .as_deref()
            .unwrap()
            .contains("Photo limit reached for this event"));
    }

    #[test]
    fn test_successful_upload_invalidates_listing() {
        let mut cache = cache_with_photos(7);
        cache.put("/api/events/8/photos", json!([]));
        let mut notifications = Notifications::new();
        let report = UploadReport {
            event_id: 7,
            kind: MediaKind::Photo,
            duration_secs: None,
            outcome: Ok(UploadReceipt { message: None }),
        };

        assert!(apply_upload_report(&report, &mut cache, &mut notifications));
        assert!(!cache.contains("/api/events/7/photos"));
        assert!(cache.contains("/api/events/8/photos"));
        assert_eq!(
            notifications.latest().unwrap().title,
            "Photo uploaded successfully"
        );
    }

    #[test]
    fn test_denied_camera_asks_for_permission() {
        let denied = event_camera::CameraError::PermissionDenied("NotAllowedError".to_string());
        let (title, text) = camera_error_notice(&denied);
        assert_eq!(title, "Camera Error");
        assert_eq!(text, "Unable to access camera. Please check permissions.");
    }
}
