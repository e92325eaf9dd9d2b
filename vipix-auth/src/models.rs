use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Body of `POST /api/admin/login`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Account returned by login and registration.
///
/// The backend may send more fields (including the stored password); only
/// the ones listed here are ever read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        match self.first_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.username.is_empty() => &self.username,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Admin session handed out by `POST /api/admin/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub session_id: String,
    #[serde(alias = "admin")]
    pub user: AdminUser,
}

/// Choice offered by the backend when an email is already registered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateEmailOption {
    #[serde(alias = "text", alias = "title")]
    pub label: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body returned by the auth endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub options: Vec<DuplicateEmailOption>,
}

/// Which login form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Account,
    Register,
    Admin,
}

/// Result of a successful login or registration
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    SignedIn(AuthUser),
    Registered(AuthUser),
    Admin(AdminSession),
}

/// State of the login form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Submitting,
    Success(AuthOutcome),
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ignores_password_field() {
        let user: AuthUser = serde_json::from_str(
            r#"{"id":4,"username":"ann","email":"ann@example.com","password":"secret","isAdmin":false}"#,
        )
        .unwrap();
        assert_eq!(user.id, 4);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_register_request_is_camel_case() {
        let req = RegisterRequest {
            username: "a@b.io".to_string(),
            email: "a@b.io".to_string(),
            password: "hunter22".to_string(),
            first_name: Some("Ann".to_string()),
            last_name: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert!(json.get("lastName").is_none());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = AuthUser {
            id: 1,
            username: String::new(),
            email: "x@y.z".to_string(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(user.display_name(), "x@y.z");
        user.username = "xy".to_string();
        assert_eq!(user.display_name(), "xy");
        user.first_name = Some("Xavier".to_string());
        assert_eq!(user.display_name(), "Xavier");
    }
}
