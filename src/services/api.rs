//! Typed access to the VIPix REST backend.
//!
//! Every call returns `Result<T, ApiError>`. There are no retries; a failed
//! request leaves the caller's state untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure, no response received
    Network(String),
    /// Non-2xx response, with the server's `message` when it sent one
    Status { status: u16, message: Option<String> },
    /// Response body did not match the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status {
                status,
                message: Some(msg),
            } => write!(f, "{}: {}", status, msg),
            ApiError::Status {
                status,
                message: None,
            } => write!(f, "Request failed with status {}", status),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    /// The server message, or `fallback`
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Builds the error for a non-success response body.
///
/// JSON bodies contribute `message` (or `error`); a short plain-text body is
/// used as-is; anything else yields no message.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.error),
        Err(_) => {
            let text = body.trim();
            (!text.is_empty() && text.len() <= 200 && !text.starts_with('<'))
                .then(|| text.to_string())
        }
    };
    ApiError::Status {
        status,
        message: message.filter(|m| !m.trim().is_empty()),
    }
}

/// Reply of endpoints that only acknowledge
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MessageReply {
    pub success: Option<bool>,
    pub message: Option<String>,
}

/// HTTP client bound to one backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning the raw JSON value, as stored by the query cache
    pub async fn get_value(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.get(path).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(path, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
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
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read(path, response).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.post(path, &serde_json::json!({})).await
    }

    async fn read<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &text);
            log::warn!("{} failed: {}", path, err);
            return Err(err);
        }

        // Acknowledgements may come back with an empty body
        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|e| {
            log::error!("Could not decode {}: {}", path, e);
            ApiError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_message_is_extracted() {
        let err = error_from_body(400, r#"{"message": "Event code already in use"}"#);
        assert_eq!(err.server_message(), Some("Event code already in use"));
    }

    #[test]
    fn test_error_field_is_fallback() {
        let err = error_from_body(500, r#"{"error": "Stripe not configured"}"#);
        assert_eq!(err.server_message(), Some("Stripe not configured"));
    }

    #[test]
    fn test_html_body_has_no_message() {
        let err = error_from_body(502, "<html><body>Bad gateway</body></html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.message_or("Failed to create event"), "Failed to create event");
    }

    #[test]
    fn test_plain_text_body_is_message() {
        let err = error_from_body(404, "Event not found");
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), Some("Event not found"));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("https://api.vipix.app/");
        assert_eq!(client.url("/api/stats"), "https://api.vipix.app/api/stats");
    }
}
