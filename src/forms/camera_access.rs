use crate::models::EventAccess;
use crate::services::api::ApiError;
use crate::services::event_service::normalize_code;

/// Login code input: upper-cased, at most 10 characters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeEntry {
    pub code: String,
    pub error: Option<String>,
    pub checking: bool,
}

impl CodeEntry {
    pub fn set_code(&mut self, input: &str) {
        self.code = normalize_code(input);
        self.error = None;
    }

    /// The code to verify, or the message shown instead of a request
    pub fn submit(&mut self) -> Option<String> {
        if self.checking {
            return None;
        }
        if self.code.is_empty() {
            self.error = Some("Please enter an event code".to_string());
            return None;
        }
        self.error = None;
        self.checking = true;
        Some(self.code.clone())
    }

    pub fn finish(&mut self, check: &AccessCheck) {
        self.checking = false;
        self.error = match check {
            AccessCheck::Granted { .. } => None,
            AccessCheck::Denied(msg) | AccessCheck::Failed(msg) => Some(msg.clone()),
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessCheck {
    /// Open the camera for this code
    Granted { code: String },
    Denied(String),
    Failed(String),
}

impl AccessCheck {
    pub fn from_reply(code: &str, reply: Result<EventAccess, ApiError>) -> Self {
        const NOT_FOUND: &str = "Event not found. Please check your code.";
        match reply {
            Ok(access) if access.access_granted => AccessCheck::Granted {
                code: code.to_string(),
            },
            Ok(access) => AccessCheck::Denied(access.message.unwrap_or_else(|| NOT_FOUND.to_string())),
            Err(ApiError::Status { message, .. }) => {
                AccessCheck::Denied(message.unwrap_or_else(|| NOT_FOUND.to_string()))
            }
            Err(e) => {
                log::error!("Access check for {} failed: {}", code, e);
                AccessCheck::Failed("Unable to verify event code. Please try again.".to_string())
            }
        }
    }

    /// Route of the camera page for a granted code
    pub fn route(&self) -> Option<String> {
        match self {
            AccessCheck::Granted { code } => Some(format!("/camera/{}", code)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_blocks() {
        let mut entry = CodeEntry::default();
        entry.set_code("   ");
        assert_eq!(entry.submit(), None);
        assert_eq!(entry.error.as_deref(), Some("Please enter an event code"));
    }

    #[test]
    fn test_code_is_uppercased_and_capped() {
        let mut entry = CodeEntry::default();
        entry.set_code("wedding1234567");
        assert_eq!(entry.code, "WEDDING123");
        assert_eq!(entry.submit().as_deref(), Some("WEDDING123"));
        assert_eq!(entry.submit(), None);
    }

    #[test]
    fn test_access_outcomes() {
        let granted = AccessCheck::from_reply(
            "CONF2025",
            Ok(EventAccess {
                access_granted: true,
                ..EventAccess::default()
            }),
        );
        assert_eq!(granted.route().as_deref(), Some("/camera/CONF2025"));

        let denied = AccessCheck::from_reply(
            "OLD",
            Err(ApiError::Status {
                status: 404,
                message: None,
            }),
        );
        assert_eq!(
            denied,
            AccessCheck::Denied("Event not found. Please check your code.".to_string())
        );

        let failed = AccessCheck::from_reply("X", Err(ApiError::Network("offline".to_string())));
        let mut entry = CodeEntry::default();
        entry.finish(&failed);
        assert_eq!(
            entry.error.as_deref(),
            Some("Unable to verify event code. Please try again.")
        );
    }
}
