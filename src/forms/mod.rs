pub mod admin_event;
pub mod camera_access;
pub mod create_event;
pub mod registration;

pub use admin_event::{AdminEventDraft, AdminField};
pub use camera_access::{AccessCheck, CodeEntry};
pub use create_event::{CreateEventWizard, WizardAction, WizardEffect, WizardStep};
pub use registration::{RegistrationFlow, RegistrationForm, RegistrationStep};

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("sarah@example.com"));
        assert!(is_valid_email(" a.b@c.io "));
        assert!(!is_valid_email("sarah@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("sa rah@example.com"));
        assert!(!is_valid_email("sarah@localhost"));
    }
}
