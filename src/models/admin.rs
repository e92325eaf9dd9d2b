use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_events: u64,
    pub total_payments: u64,
    pub total_revenue: f64,
    pub active_subscriptions: u64,
    pub flagged_issues: u64,
    pub photos_moderated: u64,
    pub storage_used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub created_at: String,
}

impl PaymentRecord {
    pub fn amount_label(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

/// Registered account as listed for administrators.
///
/// The backend also sends the stored password; it has no field here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub event_count: u32,
    #[serde(default)]
    pub photo_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_password_is_dropped() {
        let user: UserAccount = serde_json::from_str(
            r#"{"id": 1, "username": "sarah", "email": "s@x.io", "password": "hunter2", "isAdmin": false}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_payment_amount_label() {
        let payment: PaymentRecord =
            serde_json::from_str(r#"{"id": 9, "amount": 75, "eventName": "Gala"}"#).unwrap();
        assert_eq!(payment.amount_label(), "$75.00");
    }
}
