pub mod admin_service;
pub mod api;
pub mod event_service;
pub mod feedback;
pub mod session_service;

pub use api::{ApiClient, ApiError};
pub use session_service::{Session, SessionKind};
