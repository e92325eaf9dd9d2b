use crate::models::{
    AdminLoginRequest, AdminSession, AuthUser, DuplicateEmailOption, ErrorBody, LoginRequest,
    RegisterRequest,
};

/// Error type for authentication operations
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
    /// Registration with an email that already has an account
    DuplicateEmail {
        message: String,
        options: Vec<DuplicateEmailOption>,
    },
    InvalidCredentials(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AuthError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            AuthError::ServerError(msg) => write!(f, "{}", msg),
            AuthError::DuplicateEmail { message, .. } => write!(f, "{}", message),
            AuthError::InvalidCredentials(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Maps a non-success response to an [`AuthError`]
pub fn classify_error(status: u16, body: &str, fallback: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    match (status, parsed.kind.as_deref()) {
        (_, Some("duplicate_email")) => AuthError::DuplicateEmail {
            message,
            options: parsed.options,
        },
        (401, _) | (403, _) => AuthError::InvalidCredentials(message),
        _ => AuthError::ServerError(message),
    }
}

/// Account and admin authentication against the VIPix backend
#[derive(Clone)]
pub struct AuthService {
    base_url: String,
    client: reqwest::Client,
}

impl AuthService {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T, AuthError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_error(status.as_u16(), &text, fallback);
            log::warn!("{} returned {}: {}", path, status, err);
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AuthError::JsonError(format!("Failed to parse response: {}", e)))
    }

    /// Signs in an organizer account
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthUser, AuthError> {
        let user: AuthUser = self
            .post(
                "/api/auth/login",
                request,
                "Please check your credentials and try again.",
            )
            .await?;
        log::info!("Signed in as user {}", user.id);
        Ok(user)
    }

    /// Creates an organizer account
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthUser, AuthError> {
        let user: AuthUser = self
            .post(
                "/api/auth/register",
                request,
                "Failed to create user account",
            )
            .await?;
        log::info!("Registered user {}", user.id);
        Ok(user)
    }

    pub async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AdminSession, AuthError> {
        let session: AdminSession = self
            .post("/api/admin/login", request, "Invalid admin credentials")
            .await?;
        log::info!("Admin {} signed in", session.user.username);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_carries_options() {
        let body = r#"{
            "type": "duplicate_email",
            "message": "An account with this email already exists",
            "options": [{"label": "Sign in instead", "action": "login", "url": "/login"}]
        }"#;
        match classify_error(409, body, "Failed to create user account") {
            AuthError::DuplicateEmail { message, options } => {
                assert_eq!(message, "An account with this email already exists");
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].url.as_deref(), Some("/login"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_is_invalid_credentials() {
        let err = classify_error(401, r#"{"message":"Invalid credentials"}"#, "fallback");
        assert_eq!(
            err,
            AuthError::InvalidCredentials("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_non_json_body_uses_fallback() {
        let err = classify_error(500, "<html>oops</html>", "Failed to create user account");
        assert_eq!(err.to_string(), "Failed to create user account");
    }
}
