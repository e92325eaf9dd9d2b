use serde::{Deserialize, Serialize};

/// Which physical camera to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera
    User,
    /// Rear camera
    #[default]
    Environment,
}

impl FacingMode {
    pub fn opposite(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

/// Photo or video capture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    #[default]
    Photo,
    Video,
}

/// HD/standard toggle. Controls requested resolution and JPEG quality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Hd,
    Standard,
}

impl Quality {
    pub fn from_hd(hd: bool) -> Self {
        if hd {
            Quality::Hd
        } else {
            Quality::Standard
        }
    }

    pub fn is_hd(&self) -> bool {
        matches!(self, Quality::Hd)
    }

    /// Value of the `quality` form field
    pub fn tag(&self) -> &'static str {
        match self {
            Quality::Hd => "hd",
            Quality::Standard => "standard",
        }
    }

    /// Ideal capture resolution requested from the device
    pub fn resolution(&self) -> Resolution {
        match self {
            Quality::Hd => Resolution {
                width: 1920,
                height: 1080,
            },
            Quality::Standard => Resolution {
                width: 1280,
                height: 720,
            },
        }
    }

    /// JPEG encoder quality (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            Quality::Hd => 95,
            Quality::Standard => 80,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Constraints passed to the media backend when acquiring a stream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamConstraints {
    pub facing_mode: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub audio: bool,
}

impl StreamConstraints {
    /// Audio is only requested for video recording.
    pub fn new(facing_mode: FacingMode, quality: Quality, mode: CaptureMode) -> Self {
        let resolution = quality.resolution();
        Self {
            facing_mode,
            ideal_width: resolution.width,
            ideal_height: resolution.height,
            audio: mode == CaptureMode::Video,
        }
    }
}

/// A raw RGBA frame grabbed from the live stream at native resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A still ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub jpeg: Vec<u8>,
    /// `None` when no filter was selected
    pub filter: Option<String>,
    pub quality: Quality,
}

/// A finished recording ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub webm: Vec<u8>,
    pub quality: Quality,
    pub duration_secs: u32,
}

/// Configuration for a capture widget instance
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Backend base URL, e.g. `https://vipix.example.com`
    pub api_base_url: String,
    /// DOM id of the preview `<video>` element
    pub video_element_id: String,
    /// MediaRecorder timeslice in milliseconds
    pub recording_timeslice_ms: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            video_element_id: "vipix-camera-preview".to_string(),
            recording_timeslice_ms: 1000,
        }
    }
}

/// Formats seconds as `m:ss`
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parameters() {
        assert_eq!(
            Quality::Hd.resolution(),
            Resolution {
                width: 1920,
                height: 1080
            }
        );
        assert_eq!(Quality::Hd.jpeg_quality(), 95);
        assert_eq!(
            Quality::Standard.resolution(),
            Resolution {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(Quality::Standard.jpeg_quality(), 80);
    }

    #[test]
    fn test_constraints_request_audio_only_for_video() {
        let photo = StreamConstraints::new(FacingMode::User, Quality::Standard, CaptureMode::Photo);
        assert!(!photo.audio);
        assert_eq!(photo.ideal_width, 1280);

        let video = StreamConstraints::new(FacingMode::User, Quality::Hd, CaptureMode::Video);
        assert!(video.audio);
        assert_eq!(video.ideal_height, 1080);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(75), "1:15");
    }
}
