use super::event::{NewEvent, PackageType};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/create-payment-intent`.
///
/// The wizard sends the package and the event draft; the registration flow
/// sends the price together with the ids it just created.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PaymentIntentRequest {
    #[serde(rename_all = "camelCase")]
    ForDraft {
        package_type: PackageType,
        event_data: NewEvent,
    },
    #[serde(rename_all = "camelCase")]
    ForEvent {
        amount: u32,
        event_id: i64,
        user_id: i64,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentReply {
    pub client_secret: String,
}

/// Result reported by the hosted payment form
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Succeeded,
    /// Declined or rejected by the provider, with its message
    Failed(String),
    /// Script or network failure
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_intent_body() {
        let body = PaymentIntentRequest::ForEvent {
            amount: 75,
            event_id: 4,
            user_id: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"amount": 75, "eventId": 4, "userId": 2})
        );
    }
}
