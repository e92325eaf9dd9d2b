use crate::services::api::ApiError;
use std::fmt;

/// Central error type for the VIPix client
#[derive(Debug)]
pub enum AppError {
    /// Backend request failed
    Api(ApiError),
    /// Session store error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Malformed configuration file
    Config(String),
    /// Validation error (e.g. invalid inputs)
    Validation(String),
    /// Resource not found
    NotFound(String),
    /// Permission denied (e.g. camera)
    PermissionDenied(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        if e.is_not_found() {
            return AppError::NotFound(e.message_or("Resource"));
        }
        AppError::Api(e)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Other(format!("JSON error: {}", e))
    }
}

impl From<event_camera::CameraError> for AppError {
    fn from(e: event_camera::CameraError) -> Self {
        if e.is_access_error() {
            AppError::PermissionDenied(e.to_string())
        } else {
            AppError::Other(e.to_string())
        }
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
            AppError::Database(_) => "Could not access saved sessions.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(_) => "The configuration file could not be read.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("{} was not found.", msg),
            AppError::PermissionDenied(_) => {
                "Unable to access camera. Please check permissions.".to_string()
            }
            AppError::Other(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_is_shown_to_user() {
        let err: AppError = ApiError::Status {
            status: 400,
            message: Some("Event is full".to_string()),
        }
        .into();
        assert_eq!(err.user_message(), "Event is full");
    }

    #[test]
    fn test_404_becomes_not_found() {
        let err: AppError = ApiError::Status {
            status: 404,
            message: Some("Event".to_string()),
        }
        .into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Event was not found.");
    }

    #[test]
    fn test_camera_denial_maps_to_permission() {
        let err: AppError =
            event_camera::CameraError::PermissionDenied("NotAllowedError".to_string()).into();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }
}
