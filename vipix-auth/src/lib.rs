//! # VIPix Auth
//!
//! Organizer and administrator authentication for the VIPix client.
//!
//! This crate provides:
//! - Typed login, registration and admin login requests
//! - [`AuthService`] talking to `/api/auth/*` and `/api/admin/login`
//! - A Dioxus login form reporting the outcome through callbacks
//!
//! Sessions are not stored here; the application persists what it needs.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use vipix_auth::{LoginComponent, LoginMode};
//!
//! LoginComponent {
//!     base_url: "https://vipix.example.com".to_string(),
//!     mode: LoginMode::Admin,
//!     on_success: move |outcome| {
//!         // Persist the admin session and open the dashboard
//!     },
//! }
//! ```

pub mod component;
pub mod models;
pub mod service;

pub use component::{validate_fields, AuthLabels, LoginComponent, LoginProps};
pub use models::{
    AdminLoginRequest, AdminSession, AdminUser, AuthOutcome, AuthUser, DuplicateEmailOption,
    LoginMode, LoginRequest, LoginState, RegisterRequest,
};
pub use service::{classify_error, AuthError, AuthService};
