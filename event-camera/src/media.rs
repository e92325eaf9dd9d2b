//! Media device abstraction and scoped stream ownership.
//!
//! A [`MediaBackend`] is whatever the running platform offers for camera
//! access (the browser media APIs through the JS bridge, or a test double).
//! Streams are only ever held through a [`StreamGuard`], which releases every
//! track when it is dropped. A session therefore cannot leak an open stream on
//! an error path.

use crate::encode::EncodeError;
use crate::models::{Frame, StreamConstraints};
use serde::{Deserialize, Serialize};

/// Error type for camera operations
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// The user (or the platform) refused camera/microphone access
    PermissionDenied(String),
    /// No matching device or the device is busy
    DeviceUnavailable(String),
    /// Media capture is not available on this platform
    Unsupported,
    NoActiveStream,
    NotRecording,
    Encode(String),
    /// Failure talking to the platform layer
    Bridge(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::PermissionDenied(msg) => write!(f, "Camera access denied: {}", msg),
            CameraError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CameraError::Unsupported => write!(f, "Camera capture is not supported"),
            CameraError::NoActiveStream => write!(f, "No active camera stream"),
            CameraError::NotRecording => write!(f, "No recording in progress"),
            CameraError::Encode(msg) => write!(f, "Encode error: {}", msg),
            CameraError::Bridge(msg) => write!(f, "Media bridge error: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<EncodeError> for CameraError {
    fn from(err: EncodeError) -> Self {
        CameraError::Encode(err.to_string())
    }
}

impl CameraError {
    /// True for errors that should be shown as "Camera access denied"
    pub fn is_access_error(&self) -> bool {
        matches!(
            self,
            CameraError::PermissionDenied(_)
                | CameraError::DeviceUnavailable(_)
                | CameraError::Unsupported
        )
    }
}

/// Opaque handle of an acquired stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamId(pub String);

impl StreamId {
    pub fn generate() -> Self {
        StreamId(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform camera/microphone access.
///
/// Implementations are cheap handles (`Clone`) so a guard can keep its own
/// copy for releasing on drop.
#[allow(async_fn_in_trait)]
pub trait MediaBackend: Clone {
    /// Whether media capture exists at all on this platform
    fn is_supported(&self) -> bool;

    /// Requests a stream and binds it to the preview surface
    async fn acquire(&self, constraints: StreamConstraints) -> Result<StreamId, CameraError>;

    /// Stops every track of the stream. Must be idempotent.
    fn release(&self, stream: &StreamId);

    /// Draws the current frame at the video's native resolution
    async fn grab_frame(&self, stream: &StreamId) -> Result<Frame, CameraError>;

    /// Starts buffering encoded chunks every `timeslice_ms`
    async fn start_recording(&self, stream: &StreamId, timeslice_ms: u32)
        -> Result<(), CameraError>;

    /// Stops the recorder and returns the buffered chunks in order
    async fn stop_recording(&self, stream: &StreamId) -> Result<Vec<Vec<u8>>, CameraError>;

    /// Stops the recorder and discards its chunks. Must be idempotent.
    fn abort_recording(&self, stream: &StreamId);
}

/// Exclusive owner of one acquired stream
pub struct StreamGuard<B: MediaBackend> {
    backend: B,
    id: Option<StreamId>,
    constraints: StreamConstraints,
}

impl<B: MediaBackend> StreamGuard<B> {
    pub async fn acquire(backend: &B, constraints: StreamConstraints) -> Result<Self, CameraError> {
        if !backend.is_supported() {
            return Err(CameraError::Unsupported);
        }
        let id = backend.acquire(constraints).await?;
        log::info!(
            "Camera stream {} acquired ({} {}x{}, audio={})",
            id,
            constraints.facing_mode.as_str(),
            constraints.ideal_width,
            constraints.ideal_height,
            constraints.audio
        );
        Ok(Self {
            backend: backend.clone(),
            id: Some(id),
            constraints,
        })
    }

    pub fn id(&self) -> Option<&StreamId> {
        self.id.as_ref()
    }

    pub fn constraints(&self) -> StreamConstraints {
        self.constraints
    }

    /// Releases the stream now instead of waiting for drop
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(id) = self.id.take() {
            log::info!("Camera stream {} released", id);
            self.backend.release(&id);
        }
    }
}

impl<B: MediaBackend> Drop for StreamGuard<B> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// Backend for platforms without media capture
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

impl MediaBackend for UnsupportedBackend {
    fn is_supported(&self) -> bool {
        false
    }

    async fn acquire(&self, _constraints: StreamConstraints) -> Result<StreamId, CameraError> {
        Err(CameraError::Unsupported)
    }

    fn release(&self, _stream: &StreamId) {}

    async fn grab_frame(&self, _stream: &StreamId) -> Result<Frame, CameraError> {
        Err(CameraError::Unsupported)
    }

    async fn start_recording(
        &self,
        _stream: &StreamId,
        _timeslice_ms: u32,
    ) -> Result<(), CameraError> {
        Err(CameraError::Unsupported)
    }

    async fn stop_recording(&self, _stream: &StreamId) -> Result<Vec<Vec<u8>>, CameraError> {
        Err(CameraError::Unsupported)
    }

    fn abort_recording(&self, _stream: &StreamId) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Call log entries recorded by [`MockBackend`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum MediaCall {
        Acquire(StreamConstraints),
        Release(StreamId),
        GrabFrame,
        StartRecording(u32),
        StopRecording,
        AbortRecording,
    }

    #[derive(Default)]
    pub struct MockState {
        pub calls: Vec<MediaCall>,
        pub open: Vec<StreamId>,
        pub deny: bool,
        pub chunks: Vec<Vec<u8>>,
    }

    #[derive(Clone, Default)]
    pub struct MockBackend {
        pub state: Rc<RefCell<MockState>>,
    }

    impl MockBackend {
        pub fn denying() -> Self {
            let backend = Self::default();
            backend.state.borrow_mut().deny = true;
            backend
        }

        pub fn calls(&self) -> Vec<MediaCall> {
            self.state.borrow().calls.clone()
        }

        pub fn open_streams(&self) -> usize {
            self.state.borrow().open.len()
        }
    }

    impl MediaBackend for MockBackend {
        fn is_supported(&self) -> bool {
            true
        }

        async fn acquire(&self, constraints: StreamConstraints) -> Result<StreamId, CameraError> {
            let mut state = self.state.borrow_mut();
            state.calls.push(MediaCall::Acquire(constraints));
            if state.deny {
                return Err(CameraError::PermissionDenied("NotAllowedError".to_string()));
            }
            let id = StreamId::generate();
            state.open.push(id.clone());
            Ok(id)
        }

        fn release(&self, stream: &StreamId) {
            let mut state = self.state.borrow_mut();
            state.calls.push(MediaCall::Release(stream.clone()));
            state.open.retain(|s| s != stream);
        }

        async fn grab_frame(&self, _stream: &StreamId) -> Result<Frame, CameraError> {
            self.state.borrow_mut().calls.push(MediaCall::GrabFrame);
            Ok(Frame {
                width: 4,
                height: 2,
                rgba: vec![120; 4 * 2 * 4],
            })
        }

        async fn start_recording(
            &self,
            _stream: &StreamId,
            timeslice_ms: u32,
        ) -> Result<(), CameraError> {
            self.state
                .borrow_mut()
                .calls
                .push(MediaCall::StartRecording(timeslice_ms));
            Ok(())
        }

        async fn stop_recording(&self, _stream: &StreamId) -> Result<Vec<Vec<u8>>, CameraError> {
            let mut state = self.state.borrow_mut();
            state.calls.push(MediaCall::StopRecording);
            Ok(std::mem::take(&mut state.chunks))
        }

        fn abort_recording(&self, _stream: &StreamId) {
            let mut state = self.state.borrow_mut();
            state.calls.push(MediaCall::AbortRecording);
            state.chunks.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::models::{CaptureMode, FacingMode, Quality};

    fn constraints() -> StreamConstraints {
        StreamConstraints::new(FacingMode::Environment, Quality::Hd, CaptureMode::Photo)
    }

    #[tokio::test]
    async fn test_guard_releases_on_drop() {
        let backend = MockBackend::default();
        {
            let _guard = StreamGuard::acquire(&backend, constraints()).await.unwrap();
            assert_eq!(backend.open_streams(), 1);
        }
        assert_eq!(backend.open_streams(), 0);
    }

    #[tokio::test]
    async fn test_explicit_release_is_not_repeated_on_drop() {
        let backend = MockBackend::default();
        let guard = StreamGuard::acquire(&backend, constraints()).await.unwrap();
        guard.release();

        let releases = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, MediaCall::Release(_)))
            .count();
        assert_eq!(releases, 1);
    }

    #[tokio::test]
    async fn test_unsupported_backend_fails_acquire() {
        let result = StreamGuard::acquire(&UnsupportedBackend, constraints()).await;
        assert!(matches!(result, Err(CameraError::Unsupported)));
    }
}
