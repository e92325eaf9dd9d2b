//! [`MediaBackend`] on top of the webview's media APIs.
//!
//! Every renderer (web, desktop and mobile) runs the UI inside a webview, so
//! camera access goes through `getUserMedia`/`MediaRecorder` via
//! `document::eval`. Scripts answer with a single `dioxus.send` message.
//! Binary payloads (frames, recorder chunks) travel base64 encoded.

use crate::media::{CameraError, MediaBackend, StreamId};
use crate::models::{Frame, StreamConstraints};
use base64::Engine;
use dioxus::prelude::document;
use serde::Deserialize;

const BOOTSTRAP: &str = r#"window.__vipix = Object.assign({ streams: {}, recorders: {}, owners: {}, closed: {} }, window.__vipix || {});
const __vipixB64 = (bytes) => {
  let out = "";
  for (let i = 0; i < bytes.length; i += 0x8000) {
    out += String.fromCharCode.apply(null, bytes.subarray(i, i + 0x8000));
  }
  return btoa(out);
};"#;

#[derive(Debug, Default, Deserialize)]
struct BridgeReply {
    ok: bool,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    chunks: Option<Vec<String>>,
}

impl BridgeReply {
    fn into_result(self) -> Result<Self, CameraError> {
        if self.ok {
            return Ok(self);
        }
        let message = self.message.unwrap_or_default();
        Err(match self.kind.as_deref() {
            Some("denied") => CameraError::PermissionDenied(message),
            Some("unavailable") => CameraError::DeviceUnavailable(message),
            Some("unsupported") => CameraError::Unsupported,
            Some("no-stream") => CameraError::NoActiveStream,
            Some("not-recording") => CameraError::NotRecording,
            _ => CameraError::Bridge(message),
        })
    }
}

fn decode_b64(data: &str) -> Result<Vec<u8>, CameraError> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| CameraError::Bridge(format!("invalid base64 payload: {}", e)))
}

fn acquire_script(constraints_json: &str, id: &str, owner: &str, element: &str) -> String {
    format!(
        r#"const c = {constraints_json};
const id = {id:?};
const owner = {owner:?};
if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {{
  dioxus.send({{ ok: false, kind: "unsupported", message: "getUserMedia unavailable" }});
}} else {{
  try {{
    const stream = await navigator.mediaDevices.getUserMedia({{
      video: {{ facingMode: c.facingMode, width: {{ ideal: c.idealWidth }}, height: {{ ideal: c.idealHeight }} }},
      audio: c.audio,
    }});
    if (window.__vipix.closed[owner]) {{
      stream.getTracks().forEach((t) => t.stop());
      dioxus.send({{ ok: false, kind: "closed", message: "camera closed" }});
    }} else {{
      window.__vipix.streams[id] = stream;
      window.__vipix.owners[id] = owner;
      const video = document.getElementById({element:?});
      if (video) {{
        video.srcObject = stream;
        video.muted = true;
        await video.play().catch(() => {{}});
      }}
      dioxus.send({{ ok: true }});
    }}
  }} catch (e) {{
    const denied = e && (e.name === "NotAllowedError" || e.name === "SecurityError");
    dioxus.send({{ ok: false, kind: denied ? "denied" : "unavailable", message: String((e && e.message) || e) }});
  }}
}}"#
    )
}

/// Stops every stream and recorder of `owner` and refuses later acquisitions
fn close_script(owner: &str) -> String {
    format!(
        r#"const owner = {owner:?};
window.__vipix.closed[owner] = true;
for (const [id, stream] of Object.entries(window.__vipix.streams)) {{
  if (window.__vipix.owners[id] !== owner) continue;
  const entry = window.__vipix.recorders[id];
  if (entry) {{
    delete window.__vipix.recorders[id];
    entry.recorder.ondataavailable = null;
    if (entry.recorder.state !== "inactive") entry.recorder.stop();
  }}
  stream.getTracks().forEach((t) => t.stop());
  delete window.__vipix.streams[id];
  delete window.__vipix.owners[id];
}}"#
    )
}

/// Camera backend that drives the webview's media devices.
///
/// Each backend is one owner in the page-side registry. Streams it acquires
/// are tagged with that owner so [`EvalBackend::close`] can stop them even
/// when the Rust side never received their id.
#[derive(Debug, Clone)]
pub struct EvalBackend {
    video_element_id: String,
    owner: String,
}

impl EvalBackend {
    pub fn new(video_element_id: impl Into<String>) -> Self {
        Self {
            video_element_id: video_element_id.into(),
            owner: StreamId::generate().0,
        }
    }

    /// Stops every stream of this backend, including acquisitions that are
    /// still waiting on the permission prompt. The backend is unusable after.
    pub fn close(&self) {
        log::debug!("Closing camera owner {}", self.owner);
        self.fire(close_script(&self.owner));
    }

    async fn run(&self, body: String) -> Result<BridgeReply, CameraError> {
        let script = format!("{}\n{}", BOOTSTRAP, body);
        let mut eval = document::eval(&script);
        let reply: BridgeReply = eval
            .recv()
            .await
            .map_err(|e| CameraError::Bridge(format!("{:?}", e)))?;
        reply.into_result()
    }

    fn fire(&self, body: String) {
        let script = format!("{}\n{}", BOOTSTRAP, body);
        // Result is not awaited; the script runs to completion on its own
        let _ = document::eval(&script);
    }
}

impl MediaBackend for EvalBackend {
    fn is_supported(&self) -> bool {
        true
    }

    async fn acquire(&self, constraints: StreamConstraints) -> Result<StreamId, CameraError> {
        let id = StreamId::generate();
        let constraints_json = serde_json::to_string(&constraints)
            .map_err(|e| CameraError::Bridge(e.to_string()))?;
        let body = acquire_script(&constraints_json, &id.0, &self.owner, &self.video_element_id);
        self.run(body).await?;
        Ok(id)
    }

    fn release(&self, stream: &StreamId) {
        self.fire(format!(
            r#"const id = {id:?};
const stream = window.__vipix.streams[id];
if (stream) {{
  stream.getTracks().forEach((t) => t.stop());
  delete window.__vipix.streams[id];
  delete window.__vipix.owners[id];
}}
const video = document.getElementById({element:?});
if (video && video.srcObject === stream) {{ video.srcObject = null; }}"#,
            id = stream.0,
            element = self.video_element_id,
        ));
    }

    async fn grab_frame(&self, stream: &StreamId) -> Result<Frame, CameraError> {
        let body = format!(
            r#"const video = document.getElementById({element:?});
if (!window.__vipix.streams[{id:?}] || !video || !video.videoWidth) {{
  dioxus.send({{ ok: false, kind: "no-stream", message: "preview not ready" }});
}} else {{
  const canvas = document.createElement("canvas");
  canvas.width = video.videoWidth;
  canvas.height = video.videoHeight;
  const ctx = canvas.getContext("2d");
  ctx.drawImage(video, 0, 0, canvas.width, canvas.height);
  const pixels = ctx.getImageData(0, 0, canvas.width, canvas.height).data;
  dioxus.send({{ ok: true, width: canvas.width, height: canvas.height, data: __vipixB64(new Uint8Array(pixels.buffer)) }});
}}"#,
            element = self.video_element_id,
            id = stream.0,
        );
        let reply = self.run(body).await?;
        let (Some(width), Some(height), Some(data)) = (reply.width, reply.height, reply.data)
        else {
            return Err(CameraError::Bridge("incomplete frame reply".to_string()));
        };
        Ok(Frame {
            width,
            height,
            rgba: decode_b64(&data)?,
        })
    }

    async fn start_recording(&self, stream: &StreamId, timeslice_ms: u32) -> Result<(), CameraError> {
        let body = format!(
            r#"const id = {id:?};
const stream = window.__vipix.streams[id];
if (!stream) {{
  dioxus.send({{ ok: false, kind: "no-stream", message: "no stream" }});
}} else if (typeof MediaRecorder === "undefined") {{
  dioxus.send({{ ok: false, kind: "unsupported", message: "MediaRecorder unavailable" }});
}} else {{
  try {{
    const preferred = "video/webm;codecs=vp9";
    const mimeType = MediaRecorder.isTypeSupported(preferred) ? preferred : "video/webm";
    const recorder = new MediaRecorder(stream, {{ mimeType }});
    const chunks = [];
    recorder.ondataavailable = (e) => {{ if (e.data && e.data.size > 0) chunks.push(e.data); }};
    window.__vipix.recorders[id] = {{ recorder, chunks }};
    recorder.start({timeslice});
    dioxus.send({{ ok: true }});
  }} catch (e) {{
    dioxus.send({{ ok: false, kind: "bridge", message: String((e && e.message) || e) }});
  }}
}}"#,
            id = stream.0,
            timeslice = timeslice_ms,
        );
        self.run(body).await.map(|_| ())
    }

    async fn stop_recording(&self, stream: &StreamId) -> Result<Vec<Vec<u8>>, CameraError> {
        let body = format!(
            r#"const id = {id:?};
const entry = window.__vipix.recorders[id];
if (!entry) {{
  dioxus.send({{ ok: false, kind: "not-recording", message: "no recorder" }});
}} else {{
  delete window.__vipix.recorders[id];
  const finish = async () => {{
    const out = [];
    for (const blob of entry.chunks) {{
      out.push(__vipixB64(new Uint8Array(await blob.arrayBuffer())));
    }}
    dioxus.send({{ ok: true, chunks: out }});
  }};
  if (entry.recorder.state === "inactive") {{
    await finish();
  }} else {{
    entry.recorder.onstop = () => {{ finish(); }};
    entry.recorder.stop();
  }}
}}"#,
            id = stream.0,
        );
        let reply = self.run(body).await?;
        reply
            .chunks
            .unwrap_or_default()
            .iter()
            .map(|chunk| decode_b64(chunk))
            .collect()
    }

    fn abort_recording(&self, stream: &StreamId) {
        self.fire(format!(
            r#"const id = {id:?};
const entry = window.__vipix.recorders[id];
if (entry) {{
  delete window.__vipix.recorders[id];
  entry.recorder.ondataavailable = null;
  if (entry.recorder.state !== "inactive") entry.recorder.stop();
}}"#,
            id = stream.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_error_kinds() {
        let denied = BridgeReply {
            ok: false,
            kind: Some("denied".to_string()),
            message: Some("Permission denied".to_string()),
            ..BridgeReply::default()
        };
        assert_eq!(
            denied.into_result().unwrap_err(),
            CameraError::PermissionDenied("Permission denied".to_string())
        );

        let unknown: BridgeReply =
            serde_json::from_str(r#"{"ok":false,"kind":"weird","message":"boom"}"#).unwrap();
        assert_eq!(
            unknown.into_result().unwrap_err(),
            CameraError::Bridge("boom".to_string())
        );
    }

    #[test]
    fn test_late_stream_is_stopped_once_closed() {
        let script = acquire_script("{}", "s1", "owner-a", "camera-video");
        let check = script.find("window.__vipix.closed[owner]").unwrap();
        let store = script.find("window.__vipix.streams[id] = stream").unwrap();
        assert!(check < store);
        assert!(script.contains(r#"const owner = "owner-a";"#));
        assert!(script.contains("window.__vipix.owners[id] = owner"));
    }

    #[test]
    fn test_close_only_touches_own_streams() {
        let script = close_script("owner-a");
        assert!(script.contains(r#"const owner = "owner-a";"#));
        assert!(script.contains("window.__vipix.closed[owner] = true"));
        assert!(script.contains("if (window.__vipix.owners[id] !== owner) continue;"));
    }

    #[test]
    fn test_backends_are_separate_owners() {
        let a = EvalBackend::new("camera-video");
        let b = EvalBackend::new("camera-video");
        assert_ne!(a.owner, b.owner);
        assert_eq!(a.clone().owner, a.owner);
    }

    #[test]
    fn test_frame_payload_decodes() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3, 4]);
        assert_eq!(decode_b64(&encoded).unwrap(), vec![1, 2, 3, 4]);
        assert!(decode_b64("not base64!").is_err());
    }
}
