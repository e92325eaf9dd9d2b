//! Event creation from the admin dashboard.
//!
//! Admin events skip payment and go straight to `POST /api/events/direct`.
//! They belong to the admin account and start out active.

use super::create_event::sanitize_folder_name;
use super::registration::default_folder_name;
use crate::models::{DirectEvent, Event, GalleryType, Package, PackageType};
use rand::Rng;

/// Owner of events created from the admin dashboard
pub const ADMIN_USER_ID: i64 = 1;

pub const LOGIN_CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminField {
    Name,
    Description,
    EventDate,
    FolderName,
    LoginCode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminEventDraft {
    pub name: String,
    pub description: String,
    pub event_date: String,
    pub package_type: PackageType,
    pub folder_name: String,
    pub login_code: String,
}

/// Random upper-case login code of [`LOGIN_CODE_LEN`] letters and digits
pub fn generate_login_code() -> String {
    let mut rng = rand::rng();
    (0..LOGIN_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Toast body after a successful creation
pub fn created_message(event: &Event, sent_code: &str) -> String {
    let code = event.login_code.as_deref().unwrap_or(sent_code);
    format!("Event \"{}\" created with login code: {}", event.name, code)
}

impl AdminEventDraft {
    pub fn set(&mut self, field: AdminField, value: String) {
        match field {
            AdminField::Name => self.name = value,
            AdminField::Description => self.description = value,
            AdminField::EventDate => self.event_date = value,
            AdminField::FolderName => self.folder_name = sanitize_folder_name(&value),
            AdminField::LoginCode => self.login_code = value.trim().to_uppercase(),
        }
    }

    pub fn validate(&self) -> Vec<(AdminField, String)> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push((AdminField::Name, "Event name is required".to_string()));
        }
        if self.event_date.trim().is_empty() {
            errors.push((AdminField::EventDate, "Event date is required".to_string()));
        }
        errors
    }

    /// The typed login code, or a fresh one when the field was left empty
    pub fn login_code_or_generated(&self) -> String {
        match self.login_code.trim() {
            "" => generate_login_code(),
            code => code.to_uppercase(),
        }
    }

    pub fn to_request(&self, login_code: String) -> DirectEvent {
        let name = self.name.trim().to_string();
        let folder_name = match self.folder_name.trim() {
            "" => default_folder_name(&name),
            given => given.to_string(),
        };
        DirectEvent {
            description: self.description.trim().to_string(),
            event_date: self.event_date.trim().to_string(),
            package_type: self.package_type,
            folder_name,
            user_id: ADMIN_USER_ID,
            gallery_type: GalleryType::default(),
            login_code: Some(login_code),
            status: Some("active".to_string()),
            price: Some(Package::for_type(self.package_type).price_usd.to_string()),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AdminEventDraft {
        let mut draft = AdminEventDraft::default();
        draft.set(AdminField::Name, " Summer Gala ".to_string());
        draft.set(AdminField::EventDate, "2025-08-01".to_string());
        draft
    }

    #[test]
    fn test_name_and_date_required() {
        let errors = AdminEventDraft::default().validate();
        let fields: Vec<AdminField> = errors.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, vec![AdminField::Name, AdminField::EventDate]);
        assert!(draft().validate().is_empty());
    }

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..20 {
            let code = generate_login_code();
            assert_eq!(code.len(), LOGIN_CODE_LEN);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_typed_code_wins_over_generated() {
        let mut draft = draft();
        draft.set(AdminField::LoginCode, " gala25 ".to_string());
        assert_eq!(draft.login_code_or_generated(), "GALA25");

        draft.set(AdminField::LoginCode, String::new());
        assert_eq!(draft.login_code_or_generated().len(), LOGIN_CODE_LEN);
    }

    #[test]
    fn test_price_follows_package() {
        let mut draft = draft();
        let standard = draft.to_request("ABC123".to_string());
        assert_eq!(standard.price.as_deref(), Some("50"));
        assert_eq!(standard.status.as_deref(), Some("active"));
        assert_eq!(standard.user_id, ADMIN_USER_ID);
        assert_eq!(standard.folder_name, "summer-gala");
        assert_eq!(standard.name, "Summer Gala");

        draft.package_type = PackageType::Premium;
        let premium = draft.to_request("ABC123".to_string());
        assert_eq!(premium.price.as_deref(), Some("75"));
        assert_eq!(premium.login_code.as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_request_body_fields() {
        let body = serde_json::to_value(draft().to_request("XYZ789".to_string())).unwrap();
        assert_eq!(body["loginCode"], "XYZ789");
        assert_eq!(body["price"], "50");
        assert_eq!(body["userId"], 1);
        assert_eq!(body["packageType"], "standard");
    }

    #[test]
    fn test_created_message_prefers_server_code() {
        let event = Event {
            name: "Summer Gala".to_string(),
            login_code: Some("SRV001".to_string()),
            ..Event::default()
        };
        assert_eq!(
            created_message(&event, "ABC123"),
            "Event \"Summer Gala\" created with login code: SRV001"
        );
        let bare = Event {
            name: "Summer Gala".to_string(),
            ..Event::default()
        };
        assert!(created_message(&bare, "ABC123").ends_with("ABC123"));
    }
}
