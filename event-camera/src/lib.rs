//! # Event Camera
//!
//! Capture widget used by event guests to take photos and short videos.
//!
//! This crate provides:
//! - A pure capture state machine (mode, facing, HD toggle, recording)
//! - Scoped ownership of the device stream through [`StreamGuard`]
//! - Cosmetic filters baked into captured stills, JPEG encoding
//! - Upload of stills and recordings to the event endpoints
//!
//! ## Features
//!
//! - `upload`: HTTP uploader based on reqwest multipart
//! - `components`: Dioxus UI and the webview media bridge
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use event_camera::CameraInterface;
//!
//! rsx! {
//!     CameraInterface {
//!         event_id: Some(12),
//!         api_base_url: "https://vipix.example.com".to_string(),
//!         on_upload: move |report| { /* refresh gallery, show toast */ },
//!     }
//! }
//! ```

pub mod controller;
pub mod encode;
pub mod filter;
pub mod media;
pub mod models;
pub mod recorder;
pub mod state;
pub mod upload;

#[cfg(feature = "components")]
pub mod bridge;

#[cfg(feature = "components")]
pub mod components;

pub use controller::{CameraController, Reconfigured};
pub use encode::{encode_still, EncodeError};
pub use filter::{Filter, FilterOp};
pub use media::{CameraError, MediaBackend, StreamGuard, StreamId, UnsupportedBackend};
pub use models::{
    format_elapsed, CameraConfig, CaptureMode, FacingMode, Frame, PhotoUpload, Quality,
    Resolution, StreamConstraints, VideoUpload,
};
pub use recorder::{assemble_chunks, RecordingClock};
pub use state::{CameraAction, CameraEffect, CameraState, RecordingState, Transition};
pub use upload::{
    photos_path, videos_path, MediaKind, UploadError, UploadReceipt, UploadReport,
    UploadResult, Uploader,
};

#[cfg(feature = "upload")]
pub use upload::HttpUploader;

#[cfg(feature = "components")]
pub use bridge::EvalBackend;

#[cfg(feature = "components")]
pub use components::{CameraInterface, FilterControls};
