//! Runs the capture state machine against a real media backend.
//!
//! The controller owns the single live [`StreamGuard`] of a widget instance.
//! Every user intent goes through [`CameraState::reduce`]; the resulting
//! effects are executed here in order. A re-acquire always releases the old
//! stream before the new one is requested.

use crate::encode::encode_still;
use crate::media::{CameraError, MediaBackend, StreamGuard};
use crate::models::{
    CameraConfig, CaptureMode, PhotoUpload, Quality, StreamConstraints, VideoUpload,
};
use crate::filter::Filter;
use crate::recorder::assemble_chunks;
use crate::state::{CameraAction, CameraEffect, CameraState, Transition};
use crate::upload::{MediaKind, UploadReport, Uploader};

type Observer = Box<dyn FnMut(&CameraState)>;

/// Result of a settings change (facing, mode, HD).
///
/// A change made while recording uploads the clip before the stream is
/// re-acquired, so `uploads` is meaningful even when `stream` failed.
#[derive(Debug)]
pub struct Reconfigured {
    pub uploads: Vec<UploadReport>,
    pub stream: Result<(), CameraError>,
}

pub struct CameraController<B: MediaBackend, U: Uploader> {
    backend: B,
    uploader: U,
    config: CameraConfig,
    event_id: Option<i64>,
    state: CameraState,
    stream: Option<StreamGuard<B>>,
    observer: Option<Observer>,
}

impl<B: MediaBackend, U: Uploader> CameraController<B, U> {
    /// Creates an idle controller. Without an `event_id` nothing can be
    /// captured, the preview still works.
    pub fn new(backend: B, uploader: U, config: CameraConfig, event_id: Option<i64>) -> Self {
        Self {
            backend,
            uploader,
            config,
            event_id,
            state: CameraState::new(event_id.is_some()),
            stream: None,
            observer: None,
        }
    }

    /// Registers a callback invoked after every state change
    pub fn set_observer(&mut self, observer: impl FnMut(&CameraState) + 'static) {
        self.observer = Some(Box::new(observer));
        self.notify();
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Acquires the preview stream with the current settings
    pub async fn start(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.dispatch(CameraAction::StreamStarting);
        let constraints = self.state.constraints();
        self.acquire(constraints).await
    }

    pub async fn switch_facing(&mut self) -> Reconfigured {
        self.apply(CameraAction::SwitchFacing).await
    }

    pub async fn set_mode(&mut self, mode: CaptureMode) -> Reconfigured {
        self.apply(CameraAction::SetMode(mode)).await
    }

    pub async fn set_hd(&mut self, hd: bool) -> Reconfigured {
        self.apply(CameraAction::SetHd(hd)).await
    }

    pub fn select_filter(&mut self, filter: Filter) {
        self.dispatch(CameraAction::SelectFilter(filter));
    }

    pub fn toggle_flash(&mut self) {
        self.dispatch(CameraAction::ToggleFlash);
    }

    /// Advances the recording counter by one second
    pub fn tick(&mut self) {
        self.dispatch(CameraAction::Tick);
    }

    /// Grabs the current frame, bakes in the selected filter and uploads it.
    ///
    /// Returns `Ok(None)` when the shutter is disabled (wrong mode, no stream,
    /// no event or an upload still pending).
    pub async fn capture_still(&mut self) -> Result<Option<UploadReport>, CameraError> {
        if !self.state.can_capture_still() {
            log::debug!("Shutter ignored in current state");
            return Ok(None);
        }
        let (Some(event_id), Some(stream)) = (self.event_id, self.stream.as_ref()) else {
            return Ok(None);
        };
        let stream_id = stream.id().cloned().ok_or(CameraError::NoActiveStream)?;

        let frame = self.backend.grab_frame(&stream_id).await?;
        let filter = self.state.filter;
        let quality = self.state.quality;
        let jpeg = encode_still(frame, filter, quality)?;

        let photo = PhotoUpload {
            jpeg,
            filter: filter.upload_tag(),
            quality,
        };

        self.dispatch(CameraAction::UploadStarted);
        let outcome = self.uploader.upload_photo(event_id, &photo).await;
        self.dispatch(CameraAction::UploadFinished);

        Ok(Some(UploadReport {
            event_id,
            kind: MediaKind::Photo,
            duration_secs: None,
            outcome,
        }))
    }

    pub async fn start_recording(&mut self) -> Result<(), CameraError> {
        if !self.state.can_start_recording() {
            return Ok(());
        }
        let stream_id = self
            .stream
            .as_ref()
            .and_then(|s| s.id().cloned())
            .ok_or(CameraError::NoActiveStream)?;

        self.backend
            .start_recording(&stream_id, self.config.recording_timeslice_ms)
            .await?;
        log::info!("Recording started on stream {}", stream_id);
        self.dispatch(CameraAction::RecordingStarted);
        Ok(())
    }

    /// Stops the recorder and uploads the assembled clip
    pub async fn stop_recording(&mut self) -> Result<Option<UploadReport>, CameraError> {
        if !self.state.is_recording() {
            return Err(CameraError::NotRecording);
        }
        let duration_secs = self.state.elapsed_secs();
        let quality = self.state.quality;
        self.dispatch(CameraAction::RecordingStopped);
        self.finish_recording(duration_secs, quality).await
    }

    /// Aborts any recording and releases the stream
    pub fn shutdown(&mut self) {
        let effects = self.dispatch(CameraAction::Teardown);
        for effect in effects {
            match effect {
                CameraEffect::AbortRecording => self.abort_recording(),
                CameraEffect::ReleaseStream => self.release_stream(),
                other => log::warn!("Unexpected effect during teardown: {:?}", other),
            }
        }
        // Release even if the state already considered the stream gone
        self.release_stream();
    }

    async fn apply(&mut self, action: CameraAction) -> Reconfigured {
        let effects = self.dispatch(action);
        self.run_effects(effects).await
    }

    fn dispatch(&mut self, action: CameraAction) -> Vec<CameraEffect> {
        let Transition { state, effects } = std::mem::take(&mut self.state).reduce(action);
        self.state = state;
        self.notify();
        effects
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    async fn run_effects(&mut self, effects: Vec<CameraEffect>) -> Reconfigured {
        let mut uploads = Vec::new();
        let mut stream = Ok(());
        for effect in effects {
            match effect {
                CameraEffect::FinishRecording {
                    duration_secs,
                    quality,
                } => match self.finish_recording(duration_secs, quality).await {
                    Ok(Some(report)) => uploads.push(report),
                    Ok(None) => {}
                    // The stream is about to be replaced; keep going
                    Err(e) => log::error!("Failed to finish recording: {}", e),
                },
                CameraEffect::AbortRecording => self.abort_recording(),
                CameraEffect::AcquireStream(constraints) => {
                    stream = self.acquire(constraints).await;
                    if stream.is_err() {
                        break;
                    }
                }
                CameraEffect::ReleaseStream => self.release_stream(),
            }
        }
        Reconfigured { uploads, stream }
    }

    async fn acquire(&mut self, constraints: StreamConstraints) -> Result<(), CameraError> {
        self.release_stream();
        match StreamGuard::acquire(&self.backend, constraints).await {
            Ok(guard) => {
                self.stream = Some(guard);
                self.dispatch(CameraAction::StreamStarted);
                Ok(())
            }
            Err(e) => {
                log::warn!("Camera acquisition failed: {}", e);
                let message = if e.is_access_error() {
                    "Camera access denied".to_string()
                } else {
                    e.to_string()
                };
                self.dispatch(CameraAction::StreamFailed(message));
                Err(e)
            }
        }
    }

    fn release_stream(&mut self) {
        if let Some(guard) = self.stream.take() {
            guard.release();
        }
    }

    fn abort_recording(&mut self) {
        if let Some(id) = self.stream.as_ref().and_then(|s| s.id()) {
            log::info!("Recording on stream {} discarded", id);
            self.backend.abort_recording(id);
        }
    }

    async fn finish_recording(
        &mut self,
        duration_secs: u32,
        quality: Quality,
    ) -> Result<Option<UploadReport>, CameraError> {
        let stream_id = self
            .stream
            .as_ref()
            .and_then(|s| s.id().cloned())
            .ok_or(CameraError::NoActiveStream)?;
        let chunks = self.backend.stop_recording(&stream_id).await?;
        let webm = assemble_chunks(chunks);
        log::info!(
            "Recording stopped after {}s ({} bytes)",
            duration_secs,
            webm.len()
        );

        let Some(event_id) = self.event_id else {
            return Ok(None);
        };
        if webm.is_empty() {
            log::warn!("Recorder produced no data, nothing to upload");
            return Ok(None);
        }

        let video = VideoUpload {
            webm,
            quality,
            duration_secs,
        };
        self.dispatch(CameraAction::UploadStarted);
        let outcome = self.uploader.upload_video(event_id, &video).await;
        self.dispatch(CameraAction::UploadFinished);

        Ok(Some(UploadReport {
            event_id,
            kind: MediaKind::Video,
            duration_secs: Some(duration_secs),
            outcome,
        }))
    }
}

impl<B: MediaBackend, U: Uploader> Drop for CameraController<B, U> {
    fn drop(&mut self) {
        if self.stream.is_some() {
            // The observer may point into a UI scope that is already gone
            self.observer = None;
            self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::testing::{MediaCall, MockBackend};
    use crate::models::FacingMode;
    use crate::upload::{UploadError, UploadReceipt, UploadResult};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Photo(i64, PhotoUpload),
        Video(i64, VideoUpload),
    }

    #[derive(Clone, Default)]
    struct MockUploader {
        sent: Rc<RefCell<Vec<Sent>>>,
        reject_with: Option<String>,
    }

    impl Uploader for MockUploader {
        async fn upload_photo(&self, event_id: i64, photo: &PhotoUpload) -> UploadResult<UploadReceipt> {
            self.sent.borrow_mut().push(Sent::Photo(event_id, photo.clone()));
            self.result()
        }

        async fn upload_video(&self, event_id: i64, video: &VideoUpload) -> UploadResult<UploadReceipt> {
            self.sent.borrow_mut().push(Sent::Video(event_id, video.clone()));
            self.result()
        }
    }

    impl MockUploader {
        fn result(&self) -> UploadResult<UploadReceipt> {
            match &self.reject_with {
                Some(msg) => Err(UploadError::Rejected {
                    status: 400,
                    message: Some(msg.clone()),
                }),
                None => Ok(UploadReceipt::default()),
            }
        }
    }

    fn controller(
        backend: &MockBackend,
        uploader: &MockUploader,
    ) -> CameraController<MockBackend, MockUploader> {
        CameraController::new(
            backend.clone(),
            uploader.clone(),
            CameraConfig::default(),
            Some(42),
        )
    }

    #[tokio::test]
    async fn test_switch_facing_releases_before_reacquire() {
        let backend = MockBackend::default();
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);

        camera.start().await.unwrap();
        camera.switch_facing().await.stream.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0], MediaCall::Acquire(c) if c.facing_mode == FacingMode::Environment));
        assert!(matches!(&calls[1], MediaCall::Release(_)));
        assert!(matches!(&calls[2], MediaCall::Acquire(c) if c.facing_mode == FacingMode::User));
        assert_eq!(backend.open_streams(), 1);
    }

    #[tokio::test]
    async fn test_denied_access_reports_error() {
        let backend = MockBackend::denying();
        let mut camera = controller(&backend, &MockUploader::default());

        let err = camera.start().await.unwrap_err();
        assert!(err.is_access_error());
        assert_eq!(camera.state().error.as_deref(), Some("Camera access denied"));
        assert!(!camera.state().stream_active);
    }

    #[tokio::test]
    async fn test_still_carries_selected_filter() {
        let backend = MockBackend::default();
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);
        camera.start().await.unwrap();

        camera.select_filter(Filter::Vintage);
        let report = camera.capture_still().await.unwrap().unwrap();
        assert!(report.is_success());

        camera.select_filter(Filter::None);
        camera.capture_still().await.unwrap();

        let sent = uploader.sent.borrow();
        match &sent[..] {
            [Sent::Photo(42, first), Sent::Photo(42, second)] => {
                assert_eq!(first.filter.as_deref(), Some("vintage"));
                assert_eq!(first.quality, Quality::Hd);
                assert_eq!(&first.jpeg[..2], &[0xFF, 0xD8]);
                assert_eq!(second.filter, None);
            }
            other => panic!("unexpected uploads {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recording_uploads_once_with_duration() {
        let backend = MockBackend::default();
        backend.state.borrow_mut().chunks = vec![vec![1, 2, 3], vec![4, 5]];
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);

        camera.set_mode(CaptureMode::Video).await.stream.unwrap();
        camera.start().await.unwrap();
        camera.start_recording().await.unwrap();
        assert!(camera.state().is_recording());

        for _ in 0..3 {
            camera.tick();
        }
        assert_eq!(camera.state().elapsed_secs(), 3);

        let report = camera.stop_recording().await.unwrap().unwrap();
        assert_eq!(report.duration_secs, Some(3));
        assert_eq!(camera.state().elapsed_secs(), 0);

        let sent = uploader.sent.borrow();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Sent::Video(42, video) => {
                assert_eq!(video.webm, vec![1, 2, 3, 4, 5]);
                assert_eq!(video.duration_secs, 3);
            }
            other => panic!("unexpected upload {:?}", other),
        }
        assert!(backend.calls().contains(&MediaCall::StartRecording(1000)));
    }

    #[tokio::test]
    async fn test_mode_switch_while_recording_uploads_then_reacquires() {
        let backend = MockBackend::default();
        backend.state.borrow_mut().chunks = vec![vec![9]];
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);

        camera.set_mode(CaptureMode::Video).await.stream.unwrap();
        camera.start().await.unwrap();
        camera.start_recording().await.unwrap();
        camera.tick();

        let changed = camera.set_mode(CaptureMode::Photo).await;
        assert!(changed.stream.is_ok());
        let reports = changed.uploads;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, MediaKind::Video);
        assert_eq!(camera.state().mode, CaptureMode::Photo);
        assert!(camera.has_stream());

        let calls = backend.calls();
        let stop = calls.iter().position(|c| *c == MediaCall::StopRecording);
        let release = calls.iter().position(|c| matches!(c, MediaCall::Release(_)));
        assert!(stop < release);
    }

    #[tokio::test]
    async fn test_hd_toggle_while_recording_uploads_recorded_quality() {
        let backend = MockBackend::default();
        backend.state.borrow_mut().chunks = vec![vec![7, 7]];
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);

        camera.set_mode(CaptureMode::Video).await.stream.unwrap();
        camera.start().await.unwrap();
        camera.start_recording().await.unwrap();
        camera.tick();

        let changed = camera.set_hd(false).await;
        assert!(changed.stream.is_ok());
        assert_eq!(camera.state().quality, Quality::Standard);

        let sent = uploader.sent.borrow();
        match &sent[..] {
            [Sent::Video(42, video)] => assert_eq!(video.quality, Quality::Hd),
            other => panic!("unexpected uploads {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_reacquire_still_reports_finished_recording() {
        let backend = MockBackend::default();
        backend.state.borrow_mut().chunks = vec![vec![3]];
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);

        camera.set_mode(CaptureMode::Video).await.stream.unwrap();
        camera.start().await.unwrap();
        camera.start_recording().await.unwrap();
        camera.tick();

        backend.state.borrow_mut().deny = true;
        let changed = camera.switch_facing().await;

        assert_eq!(changed.uploads.len(), 1);
        assert_eq!(changed.uploads[0].kind, MediaKind::Video);
        assert!(changed.uploads[0].is_success());
        assert!(matches!(changed.stream, Err(CameraError::PermissionDenied(_))));
        assert!(!camera.has_stream());
        assert_eq!(uploader.sent.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_upload_keeps_server_message() {
        let backend = MockBackend::default();
        let uploader = MockUploader {
            reject_with: Some("Event has ended".to_string()),
            ..MockUploader::default()
        };
        let mut camera = controller(&backend, &uploader);
        camera.start().await.unwrap();

        let report = camera.capture_still().await.unwrap().unwrap();
        assert!(!report.is_success());
        assert_eq!(report.description(), "Event has ended");
        assert!(!camera.state().uploading);
    }

    #[tokio::test]
    async fn test_unbound_controller_never_uploads() {
        let backend = MockBackend::default();
        let uploader = MockUploader::default();
        let mut camera = CameraController::new(
            backend.clone(),
            uploader.clone(),
            CameraConfig::default(),
            None,
        );
        camera.start().await.unwrap();
        assert!(camera.capture_still().await.unwrap().is_none());
        assert!(uploader.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_discards_recording_and_releases() {
        let backend = MockBackend::default();
        backend.state.borrow_mut().chunks = vec![vec![1]];
        let uploader = MockUploader::default();
        let mut camera = controller(&backend, &uploader);
        camera.set_mode(CaptureMode::Video).await.stream.unwrap();
        camera.start().await.unwrap();
        camera.start_recording().await.unwrap();

        camera.shutdown();
        assert_eq!(backend.open_streams(), 0);
        assert!(backend.calls().contains(&MediaCall::AbortRecording));
        assert!(uploader.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_drop_releases_stream() {
        let backend = MockBackend::default();
        {
            let mut camera = controller(&backend, &MockUploader::default());
            camera.start().await.unwrap();
            assert_eq!(backend.open_streams(), 1);
        }
        assert_eq!(backend.open_streams(), 0);
    }
}
