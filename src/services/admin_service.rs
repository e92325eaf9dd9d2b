use super::api::{ApiClient, ApiError};
use crate::models::{AssignQrRequest, Event, GenerateBatchRequest, QrBatchReply, QrCodeItem};

pub const ADMIN_STATS_PATH: &str = "/api/admin/stats";
pub const ADMIN_EVENTS_PATH: &str = "/api/admin/events";
pub const ADMIN_PAYMENTS_PATH: &str = "/api/admin/payments";
pub const ADMIN_USERS_PATH: &str = "/api/admin/users";
pub const QR_AVAILABLE_PATH: &str = "/api/admin/qr-gallery/available";
pub const QR_STATS_PATH: &str = "/api/admin/qr-gallery/stats";

/// Regenerates the QR code of every event
pub async fn regenerate_all_qr_codes(client: &ApiClient) -> Result<QrBatchReply, ApiError> {
    let reply: Option<QrBatchReply> = client.post_empty("/api/admin/generate-qr-codes").await?;
    Ok(reply.unwrap_or_default())
}

pub async fn generate_batch(client: &ApiClient, count: u32) -> Result<QrBatchReply, ApiError> {
    let reply: Option<QrBatchReply> = client
        .post(
            "/api/admin/qr-gallery/generate-batch",
            &GenerateBatchRequest { count },
        )
        .await?;
    log::info!("Requested {} new QR codes", count);
    Ok(reply.unwrap_or_default())
}

pub async fn assign_qr_code(
    client: &ApiClient,
    qr_code_id: i64,
    event_id: i64,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .post(
            "/api/admin/qr-gallery/assign",
            &AssignQrRequest {
                qr_code_id,
                event_id,
            },
        )
        .await?;
    log::info!("Assigned QR code {} to event {}", qr_code_id, event_id);
    Ok(())
}

/// Events a gallery code can still be assigned to
pub fn assignable_events(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.login_code.as_deref().is_none_or(str::is_empty))
        .cloned()
        .collect()
}

/// Both a code and an event must be picked before assigning
pub fn validate_assignment(
    qr_code: Option<&QrCodeItem>,
    event_id: Option<i64>,
) -> Result<(i64, i64), String> {
    match (qr_code, event_id) {
        (Some(code), Some(event)) => Ok((code.id, event)),
        _ => Err("Please select both a QR code and an event".to_string()),
    }
}

/// "Generated N new QR codes", or the server's own message
pub fn batch_message(reply: &QrBatchReply, requested: u32) -> String {
    if let Some(msg) = reply.message.as_deref().filter(|m| !m.is_empty()) {
        return msg.to_string();
    }
    format!("Generated {} new QR codes", reply.count.unwrap_or(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_events_without_code_are_assignable() {
        let events = vec![
            Event {
                id: 1,
                login_code: Some("WEDDING1".to_string()),
                ..Event::default()
            },
            Event {
                id: 2,
                login_code: None,
                ..Event::default()
            },
            Event {
                id: 3,
                login_code: Some(String::new()),
                ..Event::default()
            },
        ];
        let ids: Vec<i64> = assignable_events(&events).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_assignment_requires_both() {
        let code = QrCodeItem {
            id: 5,
            code: "QR5".to_string(),
            qr_code_url: "/qr/5.png".to_string(),
            is_assigned: false,
            assigned_to: None,
            created_at: None,
        };
        assert_eq!(
            validate_assignment(Some(&code), None),
            Err("Please select both a QR code and an event".to_string())
        );
        assert_eq!(validate_assignment(Some(&code), Some(9)), Ok((5, 9)));
    }

    #[test]
    fn test_batch_message() {
        assert_eq!(
            batch_message(&QrBatchReply::default(), 10),
            "Generated 10 new QR codes"
        );
        let reply = QrBatchReply {
            message: Some("Regenerated 4 QR codes".to_string()),
            count: Some(4),
        };
        assert_eq!(batch_message(&reply, 10), "Regenerated 4 QR codes");
    }
}
