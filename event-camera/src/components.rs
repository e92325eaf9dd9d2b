//! Dioxus UI for the capture widget
//!
//! [`CameraInterface`] owns one [`CameraController`] for its whole lifetime.
//! The controller is shared between event handlers behind an async mutex and
//! mirrors its state into a signal for rendering. Upload outcomes are handed
//! to the host page through `on_upload`.

use crate::bridge::EvalBackend;
use crate::controller::{CameraController, Reconfigured};
use crate::filter::Filter;
use crate::media::CameraError;
use crate::models::{format_elapsed, CameraConfig, CaptureMode, FacingMode};
use crate::state::CameraState;
use crate::upload::{HttpUploader, UploadReport};
use dioxus::prelude::*;
use std::rc::Rc;
use tokio::sync::Mutex;

type SharedController = Rc<Mutex<CameraController<EvalBackend, HttpUploader>>>;

/// Props for the CameraInterface
#[derive(Props, Clone, PartialEq)]
pub struct CameraInterfaceProps {
    /// Event the captures belong to. Without one the shutter stays disabled.
    pub event_id: Option<i64>,
    /// Backend base URL for uploads
    pub api_base_url: String,
    #[props(default)]
    pub config: Option<CameraConfig>,
    /// Called once per finished upload, successful or not
    pub on_upload: EventHandler<UploadReport>,
    /// Called when the camera cannot be opened or a capture fails
    #[props(default)]
    pub on_camera_error: Option<EventHandler<CameraError>>,
}

/// Full-screen camera with filters, HD toggle, photo/video modes and upload
#[component]
pub fn CameraInterface(props: CameraInterfaceProps) -> Element {
    let mut view = use_signal(|| CameraState::new(props.event_id.is_some()));
    let mut flash_visible = use_signal(|| false);
    let on_upload = props.on_upload;
    let on_camera_error = props.on_camera_error;

    let config = props.config.clone().unwrap_or_default();
    let video_id = config.video_element_id.clone();

    let (controller, backend): (SharedController, EvalBackend) = use_hook(|| {
        let config = CameraConfig {
            api_base_url: props.api_base_url.clone(),
            ..config.clone()
        };
        let backend = EvalBackend::new(config.video_element_id.clone());
        let uploader = HttpUploader::new(config.api_base_url.clone());
        let mut camera = CameraController::new(backend.clone(), uploader, config, props.event_id);
        camera.set_observer(move |state: &CameraState| view.set(state.clone()));
        (Rc::new(Mutex::new(camera)), backend)
    });

    let report_error = move |e: CameraError| {
        log::warn!("Camera error: {}", e);
        if let Some(handler) = on_camera_error {
            handler.call(e);
        }
    };

    let report_change = move |changed: Reconfigured| {
        for report in changed.uploads {
            on_upload.call(report);
        }
        if let Err(e) = changed.stream {
            report_error(e);
        }
    };

    // Open the camera on mount
    use_future({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            async move {
                let mut camera = controller.lock().await;
                if let Err(e) = camera.start().await {
                    report_error(e);
                }
            }
        }
    });

    // One tick per second while recording
    use_future({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            async move {
                loop {
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                    if view.peek().is_recording() {
                        controller.lock().await.tick();
                    }
                }
            }
        }
    });

    use_drop({
        let controller = controller.clone();
        move || {
            match controller.try_lock() {
                Ok(mut camera) => {
                    camera.clear_observer();
                    camera.shutdown();
                }
                // An operation is still running; the controller releases on drop
                Err(_) => log::debug!("Camera busy during unmount, deferring release"),
            }
            // Covers a getUserMedia call that resolves after this point
            backend.close();
        }
    });

    let mut shutter_pending = use_signal(|| false);

    let on_shutter = {
        let controller = controller.clone();
        move |_| {
            if *shutter_pending.peek() {
                return;
            }
            shutter_pending.set(true);
            let controller = controller.clone();
            spawn(async move {
                let mut camera = controller.lock().await;
                let state = camera.state().clone();
                match state.mode {
                    CaptureMode::Photo => {
                        if state.flash_enabled {
                            flash_visible.set(true);
                            spawn(async move {
                                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                                flash_visible.set(false);
                            });
                        }
                        match camera.capture_still().await {
                            Ok(Some(report)) => on_upload.call(report),
                            Ok(None) => {}
                            Err(e) => report_error(e),
                        }
                    }
                    CaptureMode::Video if state.is_recording() => {
                        match camera.stop_recording().await {
                            Ok(Some(report)) => on_upload.call(report),
                            Ok(None) => {}
                            Err(e) => report_error(e),
                        }
                    }
                    CaptureMode::Video => {
                        if let Err(e) = camera.start_recording().await {
                            report_error(e);
                        }
                    }
                }
                shutter_pending.set(false);
            });
        }
    };

    let on_switch_facing = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn(async move {
                let changed = controller.lock().await.switch_facing().await;
                report_change(changed);
            });
        }
    };

    let on_toggle_hd = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            let hd = !view.peek().quality.is_hd();
            spawn(async move {
                let changed = controller.lock().await.set_hd(hd).await;
                report_change(changed);
            });
        }
    };

    let on_mode = {
        let controller = controller.clone();
        move |mode: CaptureMode| {
            let controller = controller.clone();
            spawn(async move {
                let changed = controller.lock().await.set_mode(mode).await;
                report_change(changed);
            });
        }
    };

    let on_flash = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn(async move {
                controller.lock().await.toggle_flash();
            });
        }
    };

    let on_filter = {
        let controller = controller.clone();
        move |filter: Filter| {
            let controller = controller.clone();
            spawn(async move {
                controller.lock().await.select_filter(filter);
            });
        }
    };

    let state = view();
    let mirror = if state.facing == FacingMode::User {
        "transform: scaleX(-1);"
    } else {
        ""
    };
    let preview_style = format!(
        "width: 100%; height: 100%; object-fit: cover; filter: {}; {}",
        state.filter.css(),
        mirror
    );
    let shutter_enabled = state.shutter_enabled(shutter_pending());
    let shutter_color = if state.mode == CaptureMode::Video {
        "#ef4444"
    } else {
        "white"
    };
    let shutter_radius = if state.is_recording() { "12px" } else { "50%" };
    let elapsed = format_elapsed(state.elapsed_secs());
    let mode_photo = on_mode.clone();
    let mode_video = on_mode;

    rsx! {
        div { style: "position: relative; width: 100%; height: 100vh; background: black; overflow: hidden;",
            video {
                id: "{video_id}",
                autoplay: true,
                playsinline: true,
                muted: true,
                style: "{preview_style}",
            }

            if flash_visible() {
                div { style: "position: absolute; inset: 0; background: white; opacity: 0.9; pointer-events: none;" }
            }

            if let Some(error) = state.error.clone() {
                div { style: "position: absolute; top: 50%; left: 16px; right: 16px; transform: translateY(-50%); background: rgba(0,0,0,0.75); color: white; padding: 16px; border-radius: 12px; text-align: center;",
                    p { style: "margin: 0 0 4px 0; font-weight: 600;", "{error}" }
                    p { style: "margin: 0; font-size: 13px; color: #ccc;",
                        "Please allow camera access to take photos."
                    }
                }
            } else if state.starting {
                div { style: "position: absolute; top: 50%; width: 100%; text-align: center; color: white;",
                    "Starting camera..."
                }
            }

            // Top bar
            div { style: "position: absolute; top: 0; left: 0; right: 0; display: flex; justify-content: space-between; align-items: center; padding: 16px;",
                button {
                    style: "background: rgba(0,0,0,0.5); color: white; border: none; border-radius: 20px; padding: 8px 12px;",
                    onclick: on_flash,
                    if state.flash_enabled { "⚡ On" } else { "⚡ Off" }
                }
                if state.is_recording() {
                    div { style: "background: #ef4444; color: white; border-radius: 16px; padding: 4px 12px; font-weight: 600;",
                        "● REC {elapsed}"
                    }
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "background: rgba(0,0,0,0.5); color: white; border: none; border-radius: 20px; padding: 8px 12px;",
                        onclick: on_toggle_hd,
                        if state.quality.is_hd() { "HD" } else { "SD" }
                    }
                    button {
                        style: "background: rgba(0,0,0,0.5); color: white; border: none; border-radius: 20px; padding: 8px 12px;",
                        onclick: on_switch_facing,
                        "🔄"
                    }
                }
            }

            // Bottom controls
            div { style: "position: absolute; bottom: 0; left: 0; right: 0; padding: 16px 16px 32px; background: linear-gradient(transparent, rgba(0,0,0,0.7));",
                FilterControls { selected: state.filter, on_select: on_filter }

                div { style: "display: flex; justify-content: center; gap: 16px; margin: 12px 0;",
                    ModeButton {
                        label: "Photo",
                        active: state.mode == CaptureMode::Photo,
                        on_click: move |_| mode_photo(CaptureMode::Photo),
                    }
                    ModeButton {
                        label: "Video",
                        active: state.mode == CaptureMode::Video,
                        on_click: move |_| mode_video(CaptureMode::Video),
                    }
                }

                div { style: "display: flex; justify-content: center;",
                    button {
                        style: "width: 72px; height: 72px; border-radius: 50%; border: 4px solid white; background: transparent; display: flex; align-items: center; justify-content: center;",
                        disabled: !shutter_enabled,
                        onclick: on_shutter,
                        div { style: "width: 56px; height: 56px; border-radius: {shutter_radius}; background: {shutter_color};" }
                    }
                }

                if state.uploading {
                    p { style: "text-align: center; color: white; font-size: 13px; margin: 8px 0 0 0;",
                        "Uploading..."
                    }
                }
                if !state.event_bound {
                    p { style: "text-align: center; color: #ccc; font-size: 12px; margin: 8px 0 0 0;",
                        "Capture is available once you join an event."
                    }
                }
            }
        }
    }
}

#[component]
fn ModeButton(label: &'static str, active: bool, on_click: EventHandler<()>) -> Element {
    let style = if active {
        "background: white; color: black; border: none; border-radius: 16px; padding: 6px 16px; font-weight: 600;"
    } else {
        "background: transparent; color: white; border: 1px solid rgba(255,255,255,0.5); border-radius: 16px; padding: 6px 16px;"
    };
    rsx! {
        button { style: "{style}", onclick: move |_| on_click.call(()), "{label}" }
    }
}

/// Horizontal strip of filter swatches
#[component]
pub fn FilterControls(selected: Filter, on_select: EventHandler<Filter>) -> Element {
    rsx! {
        div { style: "display: flex; gap: 12px; justify-content: center; overflow-x: auto; padding: 4px 0;",
            for filter in Filter::ALL {
                button {
                    key: "{filter.id()}",
                    style: if filter == selected {
                        "background: transparent; border: none; color: white; font-weight: 600; display: flex; flex-direction: column; align-items: center; gap: 4px;"
                    } else {
                        "background: transparent; border: none; color: #ccc; display: flex; flex-direction: column; align-items: center; gap: 4px;"
                    },
                    onclick: move |_| on_select.call(filter),
                    div {
                        style: format!(
                            "width: 44px; height: 44px; border-radius: 50%; background: linear-gradient(135deg, #f59e0b, #3b82f6); filter: {}; border: 2px solid {};",
                            filter.css(),
                            if filter == selected { "white" } else { "transparent" }
                        ),
                    }
                    span { style: "font-size: 11px;", "{filter.label()}" }
                }
            }
        }
    }
}
