//! Capture widget state and its pure transition function.
//!
//! Two independent axes: capture mode (photo/video) and recording
//! (idle/recording, only meaningful in video mode). Anything that changes the
//! stream constraints (mode, facing, HD) re-acquires the feed; the reducer
//! only *describes* that work as [`CameraEffect`]s, the controller runs it.

use crate::filter::Filter;
use crate::models::{CaptureMode, FacingMode, Quality, StreamConstraints};
use crate::recorder::RecordingClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraState {
    pub mode: CaptureMode,
    pub facing: FacingMode,
    pub quality: Quality,
    pub filter: Filter,
    pub recording: RecordingState,
    pub clock: RecordingClock,
    pub flash_enabled: bool,
    pub stream_active: bool,
    pub starting: bool,
    pub uploading: bool,
    pub error: Option<String>,
    /// Capture is only possible when the widget is bound to an event
    pub event_bound: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraAction {
    StreamStarting,
    StreamStarted,
    StreamFailed(String),
    SetMode(CaptureMode),
    SwitchFacing,
    SetHd(bool),
    SelectFilter(Filter),
    ToggleFlash,
    RecordingStarted,
    RecordingStopped,
    Tick,
    UploadStarted,
    UploadFinished,
    Teardown,
}

/// Side effects requested by a transition, in execution order
#[derive(Debug, Clone, PartialEq)]
pub enum CameraEffect {
    /// Stop the recorder and upload what was buffered, tagged with the
    /// quality the clip was recorded at
    FinishRecording { duration_secs: u32, quality: Quality },
    /// Stop the recorder and drop the buffered chunks
    AbortRecording,
    /// Release the current stream (if any) and acquire a new one
    AcquireStream(StreamConstraints),
    ReleaseStream,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CameraState,
    pub effects: Vec<CameraEffect>,
}

impl CameraState {
    pub fn new(event_bound: bool) -> Self {
        Self {
            event_bound,
            ..Self::default()
        }
    }

    pub fn constraints(&self) -> StreamConstraints {
        StreamConstraints::new(self.facing, self.quality, self.mode)
    }

    pub fn is_recording(&self) -> bool {
        self.recording == RecordingState::Recording
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    /// The shutter is disabled while an upload is pending
    pub fn can_capture_still(&self) -> bool {
        self.event_bound
            && self.mode == CaptureMode::Photo
            && self.stream_active
            && !self.uploading
    }

    pub fn can_start_recording(&self) -> bool {
        self.event_bound
            && self.mode == CaptureMode::Video
            && self.stream_active
            && !self.is_recording()
    }

    /// Whether the shutter takes a press. `in_flight` covers a press the
    /// controller has not picked up yet.
    pub fn shutter_enabled(&self, in_flight: bool) -> bool {
        if in_flight {
            return false;
        }
        match self.mode {
            CaptureMode::Photo => self.can_capture_still(),
            CaptureMode::Video => {
                self.is_recording() || (self.can_start_recording() && !self.uploading)
            }
        }
    }

    pub fn reduce(self, action: CameraAction) -> Transition {
        let mut state = self;
        let mut effects = Vec::new();

        match action {
            CameraAction::StreamStarting => {
                state.starting = true;
                state.error = None;
            }
            CameraAction::StreamStarted => {
                state.starting = false;
                state.stream_active = true;
                state.error = None;
            }
            CameraAction::StreamFailed(msg) => {
                state.starting = false;
                state.stream_active = false;
                state.error = Some(msg);
            }
            CameraAction::SetMode(mode) => {
                if mode != state.mode {
                    state.finish_recording_into(&mut effects);
                    state.mode = mode;
                    state.reacquire_into(&mut effects);
                }
            }
            CameraAction::SwitchFacing => {
                state.finish_recording_into(&mut effects);
                state.facing = state.facing.opposite();
                state.reacquire_into(&mut effects);
            }
            CameraAction::SetHd(hd) => {
                let quality = Quality::from_hd(hd);
                if quality != state.quality {
                    state.finish_recording_into(&mut effects);
                    state.quality = quality;
                    state.reacquire_into(&mut effects);
                }
            }
            CameraAction::SelectFilter(filter) => {
                state.filter = filter;
            }
            CameraAction::ToggleFlash => {
                state.flash_enabled = !state.flash_enabled;
            }
            CameraAction::RecordingStarted => {
                if state.can_start_recording() {
                    state.recording = RecordingState::Recording;
                    state.clock.start();
                }
            }
            CameraAction::RecordingStopped => {
                state.recording = RecordingState::Idle;
                state.clock.stop();
            }
            CameraAction::Tick => {
                state.clock.tick();
            }
            CameraAction::UploadStarted => {
                state.uploading = true;
            }
            CameraAction::UploadFinished => {
                state.uploading = false;
            }
            CameraAction::Teardown => {
                if state.is_recording() {
                    effects.push(CameraEffect::AbortRecording);
                    state.recording = RecordingState::Idle;
                    state.clock.stop();
                }
                if state.stream_active || state.starting {
                    effects.push(CameraEffect::ReleaseStream);
                }
                state.stream_active = false;
                state.starting = false;
            }
        }

        Transition { state, effects }
    }

    fn finish_recording_into(&mut self, effects: &mut Vec<CameraEffect>) {
        if self.is_recording() {
            let duration_secs = self.clock.stop();
            effects.push(CameraEffect::FinishRecording {
                duration_secs,
                quality: self.quality,
            });
            self.recording = RecordingState::Idle;
        }
    }

    fn reacquire_into(&mut self, effects: &mut Vec<CameraEffect>) {
        if self.stream_active || self.starting {
            effects.push(CameraEffect::AcquireStream(self.constraints()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(mode: CaptureMode) -> CameraState {
        CameraState {
            mode,
            stream_active: true,
            event_bound: true,
            ..CameraState::default()
        }
    }

    #[test]
    fn test_switch_facing_requests_opposite_camera() {
        let t = running(CaptureMode::Photo).reduce(CameraAction::SwitchFacing);
        assert_eq!(t.state.facing, FacingMode::User);
        assert_eq!(
            t.effects,
            vec![CameraEffect::AcquireStream(StreamConstraints::new(
                FacingMode::User,
                Quality::Hd,
                CaptureMode::Photo
            ))]
        );
    }

    #[test]
    fn test_hd_toggle_changes_requested_resolution() {
        let t = running(CaptureMode::Photo).reduce(CameraAction::SetHd(false));
        match &t.effects[..] {
            [CameraEffect::AcquireStream(c)] => {
                assert_eq!((c.ideal_width, c.ideal_height), (1280, 720));
            }
            other => panic!("unexpected effects {:?}", other),
        }

        let t = t.state.reduce(CameraAction::SetHd(true));
        match &t.effects[..] {
            [CameraEffect::AcquireStream(c)] => {
                assert_eq!((c.ideal_width, c.ideal_height), (1920, 1080));
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_recording_only_in_video_mode() {
        let t = running(CaptureMode::Photo).reduce(CameraAction::RecordingStarted);
        assert_eq!(t.state.recording, RecordingState::Idle);

        let t = running(CaptureMode::Video).reduce(CameraAction::RecordingStarted);
        assert_eq!(t.state.recording, RecordingState::Recording);
    }

    #[test]
    fn test_mode_switch_while_recording_finishes_first() {
        let state = running(CaptureMode::Video)
            .reduce(CameraAction::RecordingStarted)
            .state
            .reduce(CameraAction::Tick)
            .state;
        let t = state.reduce(CameraAction::SetMode(CaptureMode::Photo));
        assert_eq!(
            t.effects[0],
            CameraEffect::FinishRecording {
                duration_secs: 1,
                quality: Quality::Hd
            }
        );
        assert_eq!(t.state.elapsed_secs(), 0);
        assert!(matches!(t.effects[1], CameraEffect::AcquireStream(c) if !c.audio));
        assert!(!t.state.is_recording());
    }

    #[test]
    fn test_hd_toggle_while_recording_keeps_recorded_quality() {
        let state = running(CaptureMode::Video)
            .reduce(CameraAction::RecordingStarted)
            .state
            .reduce(CameraAction::Tick)
            .state;
        let t = state.reduce(CameraAction::SetHd(false));
        assert_eq!(
            t.effects[0],
            CameraEffect::FinishRecording {
                duration_secs: 1,
                quality: Quality::Hd
            }
        );
        assert_eq!(t.state.quality, Quality::Standard);
    }

    #[test]
    fn test_teardown_aborts_recording_and_releases() {
        let state = running(CaptureMode::Video)
            .reduce(CameraAction::RecordingStarted)
            .state;
        let t = state.reduce(CameraAction::Teardown);
        assert_eq!(
            t.effects,
            vec![CameraEffect::AbortRecording, CameraEffect::ReleaseStream]
        );
        assert!(!t.state.stream_active);
        assert_eq!(t.state.elapsed_secs(), 0);
    }

    #[test]
    fn test_shutter_disabled_while_uploading() {
        let state = running(CaptureMode::Photo);
        assert!(state.can_capture_still());
        let state = state.reduce(CameraAction::UploadStarted).state;
        assert!(!state.can_capture_still());
        let state = state.reduce(CameraAction::UploadFinished).state;
        assert!(state.can_capture_still());
    }

    #[test]
    fn test_pending_press_blocks_shutter() {
        let photo = running(CaptureMode::Photo);
        assert!(photo.shutter_enabled(false));
        assert!(!photo.shutter_enabled(true));

        let recording = running(CaptureMode::Video)
            .reduce(CameraAction::RecordingStarted)
            .state;
        assert!(recording.shutter_enabled(false));
        assert!(!recording.shutter_enabled(true));
    }

    #[test]
    fn test_unbound_widget_cannot_capture() {
        let state = CameraState {
            stream_active: true,
            ..CameraState::new(false)
        };
        assert!(!state.can_capture_still());
    }

    #[test]
    fn test_filter_change_has_no_effects() {
        let t = running(CaptureMode::Photo).reduce(CameraAction::SelectFilter(Filter::Bw));
        assert_eq!(t.state.filter, Filter::Bw);
        assert!(t.effects.is_empty());
    }
}
