use super::api::{ApiClient, ApiError, MessageReply};
use crate::models::{
    DirectEvent, DirectEventReply, Event, EventAccess, NewEvent, PaymentIntentReply,
    PaymentIntentRequest,
};

pub const EVENTS_PATH: &str = "/api/events";
pub const STATS_PATH: &str = "/api/stats";
pub const STORAGE_SETTINGS_PATH: &str = "/api/storage-settings";

pub fn event_path(id: i64) -> String {
    format!("/api/events/{}", id)
}

pub fn photos_path(id: i64) -> String {
    event_camera::photos_path(id)
}

/// Lookup used by the `/camera` code entry page
pub fn access_path(code: &str) -> String {
    format!("/api/events/access/{}", normalize_code(code))
}

/// Lookup used by `/event-camera` and `/camera/:code`
pub fn camera_access_path(code: &str) -> String {
    format!("/api/camera/{}", normalize_code(code))
}

/// Upper-cased, trimmed login code, at most 10 characters
pub fn normalize_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(10)
        .collect::<String>()
        .to_uppercase()
}

pub async fn camera_access(client: &ApiClient, code: &str) -> Result<EventAccess, ApiError> {
    client.get(&camera_access_path(code)).await
}

pub async fn create_event(client: &ApiClient, event: &NewEvent) -> Result<Event, ApiError> {
    let created: Event = client.post(EVENTS_PATH, event).await?;
    log::info!("Created event {} ({})", created.id, created.name);
    Ok(created)
}

pub async fn create_direct_event(
    client: &ApiClient,
    event: &DirectEvent,
) -> Result<Event, ApiError> {
    let reply: DirectEventReply = client.post("/api/events/direct", event).await?;
    log::info!("Created event {} for user {}", reply.event.id, event.user_id);
    Ok(reply.event)
}

/// Asks the backend to render a fresh QR code for the event
pub async fn regenerate_qr(client: &ApiClient, id: i64) -> Result<MessageReply, ApiError> {
    let path = format!("/api/events/{}/regenerate-qr", id);
    let reply: Option<MessageReply> = client.post_empty(&path).await?;
    Ok(reply.unwrap_or_default())
}

pub async fn create_payment_intent(
    client: &ApiClient,
    request: &PaymentIntentRequest,
) -> Result<String, ApiError> {
    let reply: PaymentIntentReply = client.post("/api/create-payment-intent", request).await?;
    Ok(reply.client_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_normalized() {
        assert_eq!(normalize_code(" wedding1 "), "WEDDING1");
        assert_eq!(normalize_code("abcdefghijklmno"), "ABCDEFGHIJ");
        assert_eq!(camera_access_path("conf2025"), "/api/camera/CONF2025");
        assert_eq!(access_path("bday30"), "/api/events/access/BDAY30");
    }

    #[test]
    fn test_photo_listing_key_matches_upload_key() {
        assert_eq!(photos_path(7), "/api/events/7/photos");
    }
}
