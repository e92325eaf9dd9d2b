//! Guest capture pages.
//!
//! `/camera` resolves a login code through `/api/events/access/{code}`,
//! `/camera/:code` through `/api/camera/{code}` (see `event_camera`). Both end
//! in [`CaptureView`].

use crate::cache::{use_query, QueryClient};
use crate::config::AppConfig;
use crate::forms::CodeEntry;
use crate::models::{Event, Photo};
use crate::notifications::Notifications;
use crate::routes::Screen;
use crate::services::{event_service, feedback};
use dioxus::prelude::*;
use event_camera::{CameraError, CameraInterface, UploadReport};

/// Camera bound to one event, with upload feedback wired into the app
#[component]
pub fn CaptureView(
    event_id: i64,
    title: String,
    subtitle: String,
    on_back: EventHandler<()>,
) -> Element {
    let config = use_context::<AppConfig>();
    let mut query = use_context::<QueryClient>();
    let mut notifications = use_context::<Signal<Notifications>>();

    let on_upload = move |report: UploadReport| {
        let refreshed = feedback::apply_upload_report(
            &report,
            &mut query.cache.write(),
            &mut notifications.write(),
        );
        if refreshed {
            *query.epoch.write() += 1;
        }
    };

    let photos = use_query::<Vec<Photo>>(event_service::photos_path(event_id));
    let recent: Vec<Photo> = photos
        .data
        .unwrap_or_default()
        .into_iter()
        .rev()
        .take(6)
        .collect();

    let on_camera_error = move |error: CameraError| {
        let (title, text) = feedback::camera_error_notice(&error);
        notifications.write().error(title, text);
    };

    rsx! {
        div { style: "min-height: 100vh; background: #000; color: #fff; display: flex; flex-direction: column;",
            div { style: "display: flex; align-items: center; gap: 12px; padding: 12px 16px; background: rgba(0,0,0,0.6);",
                button {
                    style: "background: none; border: none; color: #fff; font-size: 20px; cursor: pointer;",
                    onclick: move |_| on_back.call(()),
                    "←"
                }
                div {
                    h2 { style: "margin: 0; font-size: 18px;", "{title}" }
                    p { style: "margin: 0; font-size: 13px; color: #d1d5db;", "{subtitle}" }
                }
            }
            CameraInterface {
                event_id: Some(event_id),
                api_base_url: config.api_base_url.clone(),
                on_upload,
                on_camera_error,
            }
            if !recent.is_empty() {
                div { style: "display: flex; gap: 6px; padding: 8px 16px; overflow-x: auto; background: rgba(0,0,0,0.6);",
                    for photo in recent {
                        img {
                            key: "{photo.id}",
                            src: "{photo.url}",
                            alt: "{photo.filename}",
                            style: "width: 56px; height: 56px; object-fit: cover; border-radius: 6px;",
                        }
                    }
                }
            }
        }
    }
}

/// `/camera`: code entry, then capture for the resolved event
#[component]
pub fn CameraScreen(code: Option<String>, on_navigate: EventHandler<Screen>) -> Element {
    let mut active_code = use_signal(|| code.clone().map(|c| event_service::normalize_code(&c)));
    let mut entry = use_signal(CodeEntry::default);

    let Some(current) = active_code() else {
        let state = entry();
        return rsx! {
            div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px; background: #f9fafb;",
                form {
                    class: "card",
                    style: "width: 100%; max-width: 400px; padding: 24px; display: flex; flex-direction: column; gap: 12px;",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        let submitted = entry.write().submit();
                        if let Some(code) = submitted {
                            entry.set(CodeEntry::default());
                            active_code.set(Some(code));
                        }
                    },
                    div { style: "font-size: 40px; text-align: center;", "📷" }
                    h2 { style: "margin: 0; text-align: center;", "Join an Event" }
                    p { style: "margin: 0; color: #6b7280; text-align: center;", "Enter the code from your invitation" }
                    input {
                        r#type: "text",
                        value: "{state.code}",
                        placeholder: "EVENT CODE",
                        style: "padding: 12px; font-size: 20px; text-align: center; letter-spacing: 4px; font-family: monospace;",
                        oninput: move |e| entry.write().set_code(&e.value()),
                    }
                    if let Some(err) = state.error {
                        p { style: "margin: 0; color: #dc2626; font-size: 14px;", "{err}" }
                    }
                    button { r#type: "submit", class: "btn-primary", style: "padding: 12px;", "Join Event" }
                }
            }
        };
    };

    rsx! {
        EventByCode {
            code: current,
            on_retry: move |_| {
                active_code.set(None);
                entry.set(CodeEntry::default());
            },
            on_navigate,
        }
    }
}

#[component]
fn EventByCode(code: String, on_retry: EventHandler<()>, on_navigate: EventHandler<Screen>) -> Element {
    let event = use_query::<Event>(event_service::access_path(&code));

    match (event.data, event.error) {
        (Some(ev), _) => rsx! {
            CaptureView {
                event_id: ev.id,
                title: ev.name.clone(),
                subtitle: ev.photo_banner(),
                on_back: move |_| on_navigate.call(Screen::Landing),
            }
        },
        (None, Some(err)) => {
            log::warn!("Event lookup for {} failed: {}", code, err);
            rsx! {
                div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px;",
                    div { class: "card", style: "max-width: 400px; padding: 24px; text-align: center;",
                        div { style: "font-size: 40px;", "🔍" }
                        h2 { "Event Not Found" }
                        p { style: "color: #6b7280;", "No event matches the code {code}." }
                        button {
                            class: "btn-primary",
                            style: "padding: 12px 24px;",
                            onclick: move |_| on_retry.call(()),
                            "Try Again"
                        }
                    }
                }
            }
        }
        (None, None) => rsx! {
            div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center;",
                p { style: "color: #6b7280;", "Connecting to event..." }
            }
        },
    }
}
